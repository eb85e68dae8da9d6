use crate::commands::{CmdMessage, CmdResult, ShopPaths};
use crate::config::{SETTABLE_KEYS, ShopConfig};
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &ShopPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    match action {
        ConfigAction::ShowAll => {
            let config = ShopConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = ShopConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => result.add_message(CmdMessage::error(format!(
                    "Unknown config key: {} (expected one of: {})",
                    key,
                    SETTABLE_KEYS.join(", ")
                ))),
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = ShopConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::tempdir;

    #[test]
    fn set_persists_and_show_reads_back() {
        let dir = tempdir().unwrap();
        let paths = ShopPaths::new(dir.path().to_path_buf());

        let result = run(
            &paths,
            ConfigAction::Set("platform-fee".into(), "15".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "platform-fee set to 15");

        let shown = run(&paths, ConfigAction::ShowKey("platform-fee".into())).unwrap();
        assert_eq!(shown.messages[0].content, "15");

        let all = run(&paths, ConfigAction::ShowAll).unwrap();
        assert_eq!(all.config.unwrap().platform_fee, 15.0);
    }

    #[test]
    fn unknown_key_is_reported_not_raised() {
        let dir = tempdir().unwrap();
        let paths = ShopPaths::new(dir.path().to_path_buf());

        let result = run(&paths, ConfigAction::ShowKey("colour".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);

        let result = run(&paths, ConfigAction::Set("colour".into(), "red".into())).unwrap();
        assert!(result.has_errors());
        assert!(!dir.path().join("config.json").exists());
    }
}
