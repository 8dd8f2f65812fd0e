use std::path::PathBuf;

use super::{expand_glob, Catalog, Environment, PlatformProfile};
use crate::cleaner::maintenance::{CommandAction, MaintenanceAction};
use crate::common::platform::Platform;

pub(super) struct WindowsProfile;

impl PlatformProfile for WindowsProfile {
    fn platform(&self) -> Platform {
        Platform::Windows
    }

    fn catalog(&self, env: &Environment) -> Catalog {
        let home = env.home();
        let windir = env.var_path_or("WINDIR", "C:\\Windows");
        let local = env.var_path_or("LOCALAPPDATA", home.join("AppData/Local"));
        let roaming = env.var_path_or("APPDATA", home.join("AppData/Roaming"));
        let temp = env.var_path_or("TEMP", local.join("Temp"));

        let chrome = local.join("Google/Chrome/User Data/Default");
        let edge = local.join("Microsoft/Edge/User Data/Default");

        Catalog::builder()
            .category("User Temp Files", [temp])
            .category("Windows Temp", [windir.join("Temp")])
            .category("Prefetch", [windir.join("Prefetch")])
            .category("Recent Files", [roaming.join("Microsoft/Windows/Recent")])
            .category("Thumbnail Cache", [local.join("Microsoft/Windows/Explorer")])
            .category(
                "Windows Error Reports",
                [
                    local.join("Microsoft/Windows/WER"),
                    PathBuf::from("C:/ProgramData/Microsoft/Windows/WER"),
                ],
            )
            .category(
                "Windows Update Cache",
                [PathBuf::from("C:/Windows/SoftwareDistribution/Download")],
            )
            .category("DirectX Shader Cache", [local.join("D3DSCache")])
            .category(
                "Chrome Cache",
                [
                    chrome.join("Cache"),
                    chrome.join("Code Cache"),
                    chrome.join("GPUCache"),
                ],
            )
            .category("Edge Cache", [edge.join("Cache"), edge.join("Code Cache")])
            .category(
                "Firefox Cache",
                expand_glob(&local.join("Mozilla/Firefox/Profiles"), "*/cache2"),
            )
            .category("Teams Cache", [local.join("Microsoft/Teams/Cache")])
            .category(
                "Discord Cache",
                [roaming.join("discord/Cache"), roaming.join("discord/Code Cache")],
            )
            .category("Spotify Cache", [local.join("Spotify/Data")])
            .category("Log Files", [windir.join("Logs")])
            .category("Crash Dumps", [local.join("CrashDumps")])
            .category("Font Cache", [local.join("FontCache")])
            .build()
    }

    fn maintenance(&self) -> Vec<Box<dyn MaintenanceAction>> {
        vec![
            Box::new(CommandAction::new("DNS Cache", "ipconfig", ["/flushdns"])),
            Box::new(CommandAction::new(
                "Recycle Bin",
                "powershell",
                [
                    "-NoProfile",
                    "-NonInteractive",
                    "-Command",
                    "Clear-RecycleBin -Force -ErrorAction SilentlyContinue",
                ],
            )),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_vars_drive_locations() {
        let env = Environment::new(Platform::Windows, "C:/Users/ann")
            .with_var("WINDIR", "D:/Win")
            .with_var("TEMP", "E:/tmp");
        let catalog = WindowsProfile.catalog(&env);

        assert_eq!(catalog.get("User Temp Files").unwrap().paths, vec![PathBuf::from("E:/tmp")]);
        assert_eq!(catalog.get("Prefetch").unwrap().paths, vec![PathBuf::from("D:/Win/Prefetch")]);
        assert_eq!(
            catalog.get("Crash Dumps").unwrap().paths,
            vec![PathBuf::from("C:/Users/ann/AppData/Local/CrashDumps")]
        );
    }

    #[test]
    fn test_firefox_without_profiles_is_empty() {
        let env = Environment::new(Platform::Windows, "/nonexistent/home/xyz");
        let catalog = WindowsProfile.catalog(&env);
        assert!(catalog.get("Firefox Cache").unwrap().paths.is_empty());
    }

    #[test]
    fn test_maintenance_order() {
        let actions = WindowsProfile.maintenance();
        let labels: Vec<_> = actions.iter().map(|a| a.label()).collect();
        assert_eq!(labels, vec!["DNS Cache", "Recycle Bin"]);
    }
}
