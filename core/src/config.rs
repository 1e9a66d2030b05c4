//! Configuration management for host profiles and scan settings.
//!
//! Stores configuration in JSON format at `~/.portscout/config.json`.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::adapters::{SshChannel, SshTarget};
use crate::error::{Error, Result};
use crate::scanner::ScanOptions;

/// Configuration data stored in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Saved remote hosts.
    #[serde(default)]
    pub hosts: Vec<HostProfile>,

    /// Timeout for a single remote command, in seconds.
    #[serde(default = "default_command_timeout")]
    pub command_timeout: u64,

    /// Read `/proc/net/tcp` on Linux hosts lacking both ss and netstat.
    #[serde(default)]
    pub proc_net_fallback: bool,
}

fn default_command_timeout() -> u64 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosts: Vec::new(),
            command_timeout: default_command_timeout(),
            proc_net_fallback: false,
        }
    }
}

impl Config {
    /// Scan options derived from these settings.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            proc_net_fallback: self.proc_net_fallback,
        }
    }
}

/// A named ssh destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostProfile {
    /// Name used on the command line.
    pub name: String,

    /// `host` or `user@host`.
    pub destination: String,

    /// sshd port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Private key for `-i`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_file: Option<String>,

    /// Extra ssh `-o` options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ssh_options: Vec<String>,
}

impl HostProfile {
    pub fn new(name: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            destination: destination.into(),
            port: None,
            identity_file: None,
            ssh_options: Vec::new(),
        }
    }

    /// Connection target for this profile.
    pub fn target(&self) -> SshTarget {
        let mut target = SshTarget::new(&self.destination);
        target.port = self.port;
        target.identity_file = self.identity_file.as_ref().map(PathBuf::from);
        target.options = self.ssh_options.clone();
        target
    }
}

/// Configuration store for managing app settings.
///
/// Handles reading and writing configuration to `~/.portscout/config.json`.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `~/.portscout/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        let config_path = home.join(".portscout").join("config.json");

        Ok(Self { config_path })
    }

    /// Create a config store with a custom path (for testing).
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Get the configuration file path.
    pub fn path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist. Read failures are
    /// [`Error::Io`], malformed JSON is [`Error::Config`].
    pub async fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path).await?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self, config: &Config) -> Result<()> {
        if let Some(config_dir) = self.config_path.parent() {
            fs::create_dir_all(config_dir).await?;
        }

        let content = serde_json::to_string_pretty(config)?;

        // Write atomically by writing to temp file then renaming
        let temp_path = self.config_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;

        fs::rename(&temp_path, &self.config_path).await?;

        Ok(())
    }

    // =========================================================================
    // Hosts
    // =========================================================================

    /// Get all saved hosts.
    pub async fn get_hosts(&self) -> Result<Vec<HostProfile>> {
        Ok(self.load().await?.hosts)
    }

    /// Get a saved host by name.
    pub async fn get_host(&self, name: &str) -> Result<Option<HostProfile>> {
        let config = self.load().await?;
        Ok(config.hosts.into_iter().find(|h| h.name == name))
    }

    /// Save a new host profile.
    pub async fn add_host(&self, profile: HostProfile) -> Result<()> {
        let mut config = self.load().await?;

        if config.hosts.iter().any(|h| h.name == profile.name) {
            return Err(Error::Config(format!("Host '{}' already exists", profile.name)));
        }

        config.hosts.push(profile);
        config.hosts.sort_by(|a, b| a.name.cmp(&b.name));
        self.save(&config).await
    }

    /// Remove a saved host by name.
    pub async fn remove_host(&self, name: &str) -> Result<()> {
        let mut config = self.load().await?;
        let before = config.hosts.len();
        config.hosts.retain(|h| h.name != name);

        if config.hosts.len() == before {
            return Err(Error::Config(format!("Host '{}' is not saved", name)));
        }

        self.save(&config).await
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Get the remote command timeout.
    pub async fn get_command_timeout(&self) -> Result<Duration> {
        Ok(Duration::from_secs(self.load().await?.command_timeout))
    }

    /// Set the remote command timeout in seconds.
    pub async fn set_command_timeout(&self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(Error::Config("Command timeout must be at least 1 second".to_string()));
        }
        let mut config = self.load().await?;
        config.command_timeout = seconds;
        self.save(&config).await
    }

    /// Get the /proc/net/tcp fallback setting.
    pub async fn get_proc_net_fallback(&self) -> Result<bool> {
        Ok(self.load().await?.proc_net_fallback)
    }

    /// Set the /proc/net/tcp fallback setting.
    pub async fn set_proc_net_fallback(&self, enabled: bool) -> Result<()> {
        let mut config = self.load().await?;
        config.proc_net_fallback = enabled;
        self.save(&config).await
    }

    /// Build a channel for a saved host name, or treat `host` as a raw
    /// ssh destination when no profile matches.
    pub async fn channel_for(&self, host: &str) -> Result<SshChannel> {
        let config = self.load().await?;

        let target = config
            .hosts
            .iter()
            .find(|h| h.name == host)
            .map(HostProfile::target)
            .unwrap_or_else(|| SshTarget::new(host));

        Ok(SshChannel::new(target).with_timeout(Duration::from_secs(config.command_timeout)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn test_store() -> (ConfigStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        (ConfigStore::with_path(path), dir)
    }

    #[tokio::test]
    async fn test_load_nonexistent() {
        let (store, _dir) = test_store().await;
        let config = store.load().await.unwrap();
        assert!(config.hosts.is_empty());
        assert_eq!(config.command_timeout, 15);
        assert!(!config.proc_net_fallback);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let (store, _dir) = test_store().await;

        let mut profile = HostProfile::new("staging", "deploy@10.0.0.5");
        profile.port = Some(2222);
        profile.ssh_options = vec!["StrictHostKeyChecking=accept-new".to_string()];

        let config = Config {
            hosts: vec![profile.clone()],
            command_timeout: 30,
            proc_net_fallback: true,
        };

        store.save(&config).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.scan_options(), ScanOptions { proc_net_fallback: true });
    }

    #[tokio::test]
    async fn test_json_format() {
        let (store, _dir) = test_store().await;
        tokio::fs::write(
            store.path(),
            r#"{"hosts":[{"name":"pi","destination":"pi@raspberrypi.local","identityFile":"/keys/pi"}],"procNetFallback":true}"#,
        )
        .await
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.command_timeout, 15);
        assert!(config.proc_net_fallback);
        assert_eq!(config.hosts[0].identity_file.as_deref(), Some("/keys/pi"));
    }

    #[tokio::test]
    async fn test_hosts() {
        let (store, _dir) = test_store().await;

        store.add_host(HostProfile::new("web", "web.internal")).await.unwrap();
        store.add_host(HostProfile::new("db", "db.internal")).await.unwrap();

        let hosts = store.get_hosts().await.unwrap();
        let names: Vec<&str> = hosts.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["db", "web"]);

        let web = store.get_host("web").await.unwrap().unwrap();
        assert_eq!(web.destination, "web.internal");
        assert!(store.get_host("cache").await.unwrap().is_none());

        store.remove_host("web").await.unwrap();
        assert!(store.get_host("web").await.unwrap().is_none());
        assert!(store.remove_host("web").await.is_err());
    }

    #[tokio::test]
    async fn test_duplicate_host() {
        let (store, _dir) = test_store().await;

        store.add_host(HostProfile::new("web", "a")).await.unwrap();
        let result = store.add_host(HostProfile::new("web", "b")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_settings() {
        let (store, _dir) = test_store().await;

        store.set_command_timeout(5).await.unwrap();
        assert_eq!(store.get_command_timeout().await.unwrap(), Duration::from_secs(5));
        assert!(store.set_command_timeout(0).await.is_err());

        store.set_proc_net_fallback(true).await.unwrap();
        assert!(store.get_proc_net_fallback().await.unwrap());
    }

    #[tokio::test]
    async fn test_channel_for_profile_and_raw_destination() {
        let (store, _dir) = test_store().await;

        let mut profile = HostProfile::new("staging", "deploy@10.0.0.5");
        profile.port = Some(2222);
        store.add_host(profile).await.unwrap();

        let channel = store.channel_for("staging").await.unwrap();
        assert_eq!(channel.target().destination, "deploy@10.0.0.5");
        assert_eq!(channel.target().port, Some(2222));

        let channel = store.channel_for("root@other").await.unwrap();
        assert_eq!(channel.target(), &SshTarget::new("root@other"));
    }

    #[tokio::test]
    async fn test_unreadable_config_is_io_error() {
        let dir = tempdir().unwrap();
        // A directory where the file should be
        let store = ConfigStore::with_path(dir.path().to_path_buf());

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_malformed_config_is_config_error() {
        let (store, _dir) = test_store().await;
        tokio::fs::write(store.path(), "{ not json").await.unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_save_into_unwritable_location_is_io_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        tokio::fs::write(&blocker, "").await.unwrap();

        // Parent "directory" is a regular file
        let store = ConfigStore::with_path(blocker.join("config.json"));
        let err = store.save(&Config::default()).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_profile_target() {
        let mut profile = HostProfile::new("pi", "pi@raspberrypi.local");
        profile.identity_file = Some("/keys/pi".to_string());

        let target = profile.target();
        assert_eq!(target.destination, "pi@raspberrypi.local");
        assert_eq!(target.identity_file, Some(PathBuf::from("/keys/pi")));
    }
}
