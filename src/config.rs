use std::path::PathBuf;

pub const DEFAULT_ADB_PATH: &str = "adb";
pub const DEFAULT_DEVICE_ADDRESS: &str = "127.0.0.1:7555";
pub const DEFAULT_EXPORT_DIR: &str = "export";
pub const STAGE_PREFIX: &str = "/sdcard/adb_temp_";

/// Remote prefixes readable only by root. Shell commands touching these are
/// wrapped in `su -c`, and pulls are staged through world-readable storage.
pub const PRIVILEGED_PREFIXES: [&str; 3] = ["/data/app/", "/data/data/", "/data/user/"];

/// The four resource categories extracted per package, in run order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    App,
    Data,
    SdcardData,
    Obb,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::App,
        Category::Data,
        Category::SdcardData,
        Category::Obb,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::App => "APK and libs",
            Category::Data => "private data",
            Category::SdcardData => "external storage",
            Category::Obb => "OBB packages",
        }
    }

    /// Subdirectory under the package export directory.
    pub fn subdir(self) -> &'static str {
        match self {
            Category::App => "app",
            Category::Data => "data",
            Category::SdcardData => "sdcard_data",
            Category::Obb => "obb",
        }
    }

    pub fn remote_template(self) -> &'static str {
        match self {
            Category::App => "/data/app/{pkg}*/",
            Category::Data => "/data/data/{pkg}/",
            Category::SdcardData => "/storage/emulated/0/Android/data/{pkg}/",
            Category::Obb => "/storage/emulated/0/Android/obb/{pkg}/",
        }
    }

    pub fn remote_path(self, package: &str) -> String {
        self.remote_template().replace("{pkg}", package)
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub adb_path: PathBuf,
    pub device_address: String,
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adb_path: PathBuf::from(DEFAULT_ADB_PATH),
            device_address: DEFAULT_DEVICE_ADDRESS.to_string(),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_paths_substitute_package_name() {
        assert_eq!(
            Category::Data.remote_path("com.example.app"),
            "/data/data/com.example.app/"
        );
        assert_eq!(
            Category::Obb.remote_path("com.example.app"),
            "/storage/emulated/0/Android/obb/com.example.app/"
        );
        assert_eq!(
            Category::App.remote_path("com.example.app"),
            "/data/app/com.example.app*/"
        );
    }

    #[test]
    fn categories_run_in_fixed_order() {
        assert_eq!(
            Category::ALL.map(Category::subdir),
            ["app", "data", "sdcard_data", "obb"]
        );
    }
}
