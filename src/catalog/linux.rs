use std::path::PathBuf;

use super::{expand_glob, Catalog, Environment, PlatformProfile};
use crate::cleaner::maintenance::{CommandAction, MaintenanceAction};
use crate::common::platform::Platform;

pub(super) struct LinuxProfile;

impl PlatformProfile for LinuxProfile {
    fn platform(&self) -> Platform {
        Platform::Linux
    }

    fn catalog(&self, env: &Environment) -> Catalog {
        let home = env.home();
        let cache = home.join(".cache");

        Catalog::builder()
            .category("User Cache", [cache.clone()])
            .category(
                "Temporary Files",
                [PathBuf::from("/tmp"), PathBuf::from("/var/tmp")],
            )
            .category("System Logs", [PathBuf::from("/var/log")])
            .category("User Logs", [home.join(".local/share/recently-used.xbel")])
            .category("Thumbnail Cache", [cache.join("thumbnails")])
            .category(
                "Chrome Cache",
                [
                    cache.join("google-chrome"),
                    home.join(".config/google-chrome/Default/Cache"),
                ],
            )
            .category(
                "Firefox Cache",
                expand_glob(&home.join(".mozilla/firefox"), "*/cache2"),
            )
            .category("pip Cache", [cache.join("pip")])
            .category("apt Cache", [PathBuf::from("/var/cache/apt/archives")])
            .category("npm Cache", [home.join(".npm/_cacache")])
            .category("Trash", [home.join(".local/share/Trash")])
            .category(
                "Coredumps",
                [
                    PathBuf::from("/var/crash"),
                    home.join(".local/share/apport/coredump"),
                ],
            )
            .build()
    }

    fn maintenance(&self) -> Vec<Box<dyn MaintenanceAction>> {
        vec![Box::new(CommandAction::new(
            "Sync Disk Buffers",
            "sync",
            std::iter::empty::<&str>(),
        ))]
    }
}
