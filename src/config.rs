//! 配置模块：作用域别名的存取

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 别名配置错误
#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "配置错误: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

/// 别名存储的能力接口
///
/// 编译器只通过这个接口读取别名, 从不直接接触持久化细节;
/// 别名定义命令通过 `set` 写入。
pub trait AliasStore {
    /// 查找短名对应的完整作用域, 没有时返回 None
    fn get(&self, name: &str) -> Option<String>;
    /// 写入或覆盖一个别名
    fn set(&mut self, name: &str, target: &str);
}

/// 内存别名表, 用于测试和嵌入场景
impl AliasStore for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }

    fn set(&mut self, name: &str, target: &str) {
        self.insert(name.to_string(), target.to_string());
    }
}

/// JSON 文件持久化的别名表
///
/// 文件格式是扁平的 JSON 对象：`{ "短名": "完整作用域", ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasFileStore {
    /// 短名到完整作用域的映射
    #[serde(flatten)]
    aliases: HashMap<String, String>,
    #[serde(skip)]
    path: PathBuf,
}

impl AliasFileStore {
    /// 从JSON文件加载别名配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();

        // 检查文件是否存在
        if !path_ref.exists() {
            return Err(ConfigError::new(format!(
                "配置文件不存在: {}",
                path_ref.display()
            )));
        }

        // 读取文件内容
        let content = fs::read_to_string(path_ref).map_err(|e| {
            ConfigError::new(format!("无法读取配置文件 {}: {}", path_ref.display(), e))
        })?;

        // 解析JSON
        let mut store: AliasFileStore = serde_json::from_str(&content).map_err(|e| {
            ConfigError::new(format!("无法解析JSON配置文件 {}: {}", path_ref.display(), e))
        })?;
        store.path = path_ref.to_path_buf();

        Ok(store)
    }

    /// 加载别名配置, 文件缺失或损坏时退回空配置
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path_ref = path.as_ref();
        Self::from_json_file(path_ref).unwrap_or_else(|_| Self {
            aliases: HashMap::new(),
            path: path_ref.to_path_buf(),
        })
    }

    /// 把当前别名表写回配置文件
    pub fn save(&self) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&self)
            .map_err(|e| ConfigError::new(format!("无法序列化别名配置: {}", e)))?;
        fs::write(&self.path, content).map_err(|e| {
            ConfigError::new(format!("无法写入配置文件 {}: {}", self.path.display(), e))
        })?;
        Ok(())
    }

    /// 获取所有别名
    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }
}

impl AliasStore for AliasFileStore {
    fn get(&self, name: &str) -> Option<String> {
        self.aliases.get(name).cloned()
    }

    fn set(&mut self, name: &str, target: &str) {
        self.aliases.insert(name.to_string(), target.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    #[test]
    fn test_load_valid_json_config() {
        // 创建临时配置文件
        let temp_file = "test_aliases_load.json";
        let mut file = fs::File::create(temp_file).unwrap();
        writeln!(
            file,
            r#"{{
            "a": "accounts",
            "jq": "job_queue"
        }}"#
        )
        .unwrap();

        // 测试加载
        let store = AliasFileStore::from_json_file(temp_file).unwrap();
        assert_eq!(store.get("a"), Some("accounts".to_string()));
        assert_eq!(store.get("jq"), Some("job_queue".to_string()));
        assert_eq!(store.get("unknown"), None);

        // 清理
        fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_invalid_json_config() {
        let temp_file = "test_aliases_invalid.json";
        let mut file = fs::File::create(temp_file).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = AliasFileStore::from_json_file(temp_file);
        assert!(result.is_err());

        // 清理
        fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_missing_file() {
        let result = AliasFileStore::from_json_file("non_existent_aliases.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_save_round_trip() {
        let temp_file = "test_aliases_save.json";
        let mut store = AliasFileStore::load_or_default(temp_file);
        store.set("a", "accounts");
        store.save().unwrap();

        let reloaded = AliasFileStore::from_json_file(temp_file).unwrap();
        assert_eq!(reloaded.get("a"), Some("accounts".to_string()));

        // 清理
        fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_hashmap_store() {
        let mut aliases: HashMap<String, String> = HashMap::new();
        AliasStore::set(&mut aliases, "a", "accounts");
        assert_eq!(AliasStore::get(&aliases, "a"), Some("accounts".to_string()));
        assert_eq!(AliasStore::get(&aliases, "b"), None);
    }
}
