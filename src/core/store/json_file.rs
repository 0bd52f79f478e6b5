use crate::model::error::Error;
use crate::model::error::io::IOError;
use crate::model::error::misc::MiscError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;

/// A whole-file JSON document, rewritten in full on every save.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Missing files read as the default value.
    pub async fn read<T: DeserializeOwned + Default>(&self) -> Result<T, Error> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(T::default()),
            Err(err) => return Err(IOError::read_file_failed(&self.path, err).into()),
        };
        if content.trim().is_empty() {
            return Ok(T::default());
        }
        let value = serde_json::from_str(&content)
            .map_err(|err| MiscError::deserialize_error(&self.path, err))?;
        Ok(value)
    }

    pub async fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), Error> {
        let content = serde_json::to_string_pretty(value)
            .map_err(|err| MiscError::serialize_error(&self.path, err))?;

        let mut temp_name = self.path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);
        fs::write(&temp_path, content)
            .await
            .map_err(|err| IOError::write_file_failed(&temp_path, err))?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|err| IOError::write_file_failed(&self.path, err))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_file_reads_as_default() {
        let dir = tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("tasks.json"));
        let value: BTreeMap<String, u32> = file.read().await.unwrap();
        assert!(value.is_empty());
    }

    #[tokio::test]
    async fn write_replaces_whole_document() {
        let dir = tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("history.json"));
        file.write(&vec![1, 2, 3]).await.unwrap();
        file.write(&vec![4]).await.unwrap();

        let value: Vec<u32> = file.read().await.unwrap();
        assert_eq!(value, vec![4]);
        assert!(!dir.path().join("history.json.tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.json");
        std::fs::write(&path, "{not json").unwrap();
        let result: Result<Vec<u32>, Error> = JsonFile::new(&path).read().await;
        assert!(matches!(result, Err(Error::Misc(MiscError::DeserializeError { .. }))));
    }
}
