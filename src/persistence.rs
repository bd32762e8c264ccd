//! 마지막 입력값을 키-값 저장소에 보관하고 다음 실행 때 되살린다.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::input::{InputPair, InputRecord};
use crate::workflow::Workflow;

/// 저장소 입출력 오류.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// 문자열 키-값 저장소.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// 테스트와 임시 세션용 메모리 저장소.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// JSON 객체 파일 하나에 모든 키를 담는 저장소. 쓸 때마다 파일 전체를 다시 쓴다.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    /// 디스크의 파일이 읽을 수 없어 버려진 상태
    discarded: bool,
}

impl FileStore {
    /// 파일을 연다. 없으면 빈 저장소, 깨진 파일은 경고 후 빈 저장소로 시작한다.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let (entries, discarded) = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => (entries, false),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable storage file");
                    (BTreeMap::new(), true)
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => (BTreeMap::new(), false),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            entries,
            discarded,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        self.flush()?;
        self.discarded = false;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        // 버려진 파일은 지울 키가 없어도 빈 객체로 덮어쓴다.
        if self.entries.remove(key).is_some() || self.discarded {
            self.flush()?;
            self.discarded = false;
        }
        Ok(())
    }
}

/// 저장소에서 되살린 입력. 없거나 깨진 공정은 `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedInputs {
    pub chemistry_free: Option<InputRecord>,
    pub traditional: Option<InputRecord>,
}

impl SavedInputs {
    pub fn get(&self, workflow: Workflow) -> Option<&InputRecord> {
        match workflow {
            Workflow::ChemistryFree => self.chemistry_free.as_ref(),
            Workflow::Traditional => self.traditional.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chemistry_free.is_none() && self.traditional.is_none()
    }
}

/// 두 공정의 입력을 고정 키 아래에 JSON으로 기록한다.
pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, inputs: &InputPair) -> Result<(), StorageError> {
    for wf in Workflow::ALL {
        let json = serde_json::to_string(inputs.get(wf))?;
        store.set(wf.storage_key(), json)?;
    }
    tracing::info!("inputs saved");
    Ok(())
}

fn load_one<S: KeyValueStore + ?Sized>(store: &S, workflow: Workflow) -> Option<InputRecord> {
    let key = workflow.storage_key();
    let raw = match store.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read saved inputs");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding corrupt saved inputs");
            None
        }
    }
}

/// 저장된 입력을 읽는다. 실패는 "복원할 것 없음"으로 취급한다.
pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> SavedInputs {
    let saved = SavedInputs {
        chemistry_free: load_one(store, Workflow::ChemistryFree),
        traditional: load_one(store, Workflow::Traditional),
    };
    tracing::info!(
        chemistry_free = saved.chemistry_free.is_some(),
        traditional = saved.traditional.is_some(),
        "saved inputs loaded"
    );
    saved
}

/// 저장된 입력을 지운다.
pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StorageError> {
    for wf in Workflow::ALL {
        store.remove(wf.storage_key())?;
    }
    Ok(())
}
