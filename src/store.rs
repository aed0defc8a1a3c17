use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_PLANS_DIR: &str = "generated_plans";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid plan id: {0}")]
    InvalidId(String),
    #[error("plan not found: {0}")]
    NotFound(String),
    #[error("plan storage error: {0}")]
    Io(#[from] io::Error),
}

// 8 lowercase hex digits
pub fn is_valid_id(id: &str) -> bool {
    id.len() == 8 && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

// Rendered plans, one Markdown file per id
#[derive(Debug, Clone)]
pub struct PlanStore {
    dir: PathBuf,
}

impl PlanStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("course_plan_{id}.md"))
    }

    /// Persist `content` under a fresh id and return the id.
    pub fn save(&self, content: &str) -> Result<String, StoreError> {
        fs::create_dir_all(&self.dir)?;

        let mut id = new_id();
        while self.path_for(&id).exists() {
            id = new_id();
        }

        let path = self.path_for(&id);
        let tmp_path = path.with_extension("md.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &path)?;
        Ok(id)
    }

    pub fn load(&self, id: &str) -> Result<String, StoreError> {
        if !is_valid_id(id) {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        match fs::read_to_string(self.path_for(id)) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
