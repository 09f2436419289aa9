use ca_packager::config::{ConfigFile, DataFile, RawConfigFile};
use ca_packager::fs::mock::MockFileSystem;

/// Builder for `ConfigFile`, starting from the built-in configuration.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.config.build.name = name.to_string();
        self
    }

    pub fn entry(mut self, entry: &str) -> Self {
        self.config.build.entry = entry.to_string();
        self
    }

    pub fn dist_dir(mut self, dir: &str) -> Self {
        self.config.build.dist_dir = dir.to_string();
        self
    }

    pub fn add_data(mut self, source: &str, dest: &str) -> Self {
        self.config.build.add_data.push(DataFile {
            source: source.to_string(),
            dest: dest.to_string(),
        });
        self
    }

    pub fn install_command(mut self, cmd: &[&str]) -> Self {
        self.config.tool.install = cmd.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A working directory holding every input file `cfg` needs.
pub fn workdir_with_inputs(cfg: &ConfigFile) -> MockFileSystem {
    let fs = MockFileSystem::new();
    for file in cfg.build.input_files() {
        fs.add_file(file);
    }
    fs
}
