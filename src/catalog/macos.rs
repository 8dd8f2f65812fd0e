use std::path::PathBuf;

use super::{Catalog, Environment, PlatformProfile};
use crate::cleaner::maintenance::{CommandAction, MaintenanceAction};
use crate::common::platform::Platform;

pub(super) struct MacOsProfile;

impl PlatformProfile for MacOsProfile {
    fn platform(&self) -> Platform {
        Platform::MacOs
    }

    fn catalog(&self, env: &Environment) -> Catalog {
        let home = env.home();
        let caches = home.join("Library/Caches");

        Catalog::builder()
            .category("User Cache", [caches.clone()])
            .category("System Log Files", [PathBuf::from("/var/log")])
            .category("User Log Files", [home.join("Library/Logs")])
            .category(
                "Temporary Files",
                [PathBuf::from("/tmp"), PathBuf::from("/var/tmp")],
            )
            .category("Chrome Cache", [caches.join("Google/Chrome")])
            .category("Firefox Cache", [caches.join("Firefox")])
            .category("Safari Cache", [caches.join("com.apple.Safari")])
            .category("Trash", [home.join(".Trash")])
            .category(
                "iOS Device Backups",
                [home.join("Library/Application Support/MobileSync/Backup")],
            )
            .category("Xcode Cache", [home.join("Library/Developer/Xcode/DerivedData")])
            .category("pip Cache", [caches.join("pip")])
            .build()
    }

    fn maintenance(&self) -> Vec<Box<dyn MaintenanceAction>> {
        vec![Box::new(CommandAction::new(
            "DNS Cache",
            "dscacheutil",
            ["-flushcache"],
        ))]
    }
}
