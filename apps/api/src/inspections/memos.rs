use std::sync::Arc;

use chrono::Local;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::memo::Memo;
use crate::store::{self, KeyValueStore, MEMOS_KEY};

pub const MAX_MEMO_CHARS: usize = 500;

const TIMESTAMP_FORMAT: &str = "%Y. %m. %d. %H:%M";

/// Inspector notes, newest first, mirrored to the store on every change.
pub struct MemoBook {
    store: Arc<dyn KeyValueStore>,
    memos: Vec<Memo>,
}

impl MemoBook {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let memos: Vec<Memo> = store::load_or_default(store.as_ref(), MEMOS_KEY);
        info!(count = memos.len(), "Loaded persisted memos");
        Self { store, memos }
    }

    pub fn list(&self) -> &[Memo] {
        &self.memos
    }

    pub fn add(&mut self, content: &str) -> Result<Memo, AppError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("Memo content is empty".to_string()));
        }
        let length = content.chars().count();
        if length > MAX_MEMO_CHARS {
            return Err(AppError::Validation(format!(
                "Memo is {length} characters; the limit is {MAX_MEMO_CHARS}"
            )));
        }

        let memo = Memo {
            id: Uuid::now_v7(),
            content: content.to_string(),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        };
        self.memos.insert(0, memo.clone());
        store::persist(self.store.as_ref(), MEMOS_KEY, &self.memos);
        Ok(memo)
    }

    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.memos.len();
        self.memos.retain(|memo| memo.id != id);
        if self.memos.len() == before {
            return false;
        }
        store::persist(self.store.as_ref(), MEMOS_KEY, &self.memos);
        true
    }

    pub fn clear(&mut self) {
        self.memos.clear();
        if let Err(e) = self.store.remove(MEMOS_KEY) {
            warn!(error = %e, "Failed to clear persisted memos");
        }
    }
}
