use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::errors::{FeedPingError, FeedPingResult};
use crate::storage::state::State;
use crate::storage::traits::StateStore;

/// Store that keeps the application state in a single JSON file.
///
/// One mutex guards both the in-memory state and the durable write, so
/// concurrent callers are fully serialized: readers never observe a
/// half-updated structure and no update is lost between read-modify-write
/// cycles. Every mutation rewrites the whole file; write volume is bounded
/// by subscriber changes and one watermark update per feed per poll cycle,
/// so the rewrite cost stays negligible.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    state: Mutex<State>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is created and durably initialized with empty state
    /// right away, so later opens never race on absence. A blank file is
    /// treated as not-yet-written and left untouched. A file that exists
    /// but does not decode is an error; the process must not continue with
    /// a silently guessed state.
    pub fn open<P: AsRef<Path>>(path: P) -> FeedPingResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            state: Mutex::new(State::default()),
        };

        let bytes = match fs::read(&store.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                store.persist(&State::default())?;
                return Ok(store);
            }
            Err(e) => return Err(FeedPingError::StateRead(e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(store);
        }

        let state: State = serde_json::from_slice(&bytes)
            .map_err(|e| FeedPingError::StateDecode(e.to_string()))?;
        *store.lock() = state;

        Ok(store)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rewrite the whole backing file from `state`.
    ///
    /// The bytes go to a sibling temp file first and are renamed over the
    /// target, so an interrupted write cannot leave a file that fails to
    /// decode on the next open.
    fn persist(&self, state: &State) -> FeedPingResult<()> {
        let data = serde_json::to_vec_pretty(state)
            .map_err(|e| FeedPingError::StateEncode(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &data).map_err(FeedPingError::StateWrite)?;
        fs::rename(&tmp, &self.path).map_err(FeedPingError::StateWrite)
    }
}

impl StateStore for FileStore {
    fn subscribers(&self) -> Vec<i64> {
        self.lock().subscribers.clone()
    }

    fn set_subscribers(&self, subscribers: Vec<i64>) -> FeedPingResult<()> {
        let mut state = self.lock();
        state.subscribers = subscribers;
        self.persist(&state)
    }

    fn watermark(&self, feed: &str) -> DateTime<Utc> {
        self.lock()
            .watermarks
            .get(feed)
            .copied()
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    fn set_watermark(&self, feed: &str, at: DateTime<Utc>) -> FeedPingResult<()> {
        let mut state = self.lock();
        state.watermarks.insert(feed.to_string(), at);
        self.persist(&state)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use tempfile::TempDir;

    use super::*;

    fn state_path(dir: &TempDir) -> PathBuf {
        dir.path().join("feedping.json")
    }

    #[test]
    fn test_open_valid_state() {
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);

        let data = concat!(
            "{\n",
            "  \"subscribers\": [1],\n",
            "  \"watermarks\": {\n",
            "    \"http://example.com/feed\": \"2021-03-20T05:00:00Z\"\n",
            "  }\n",
            "}"
        );
        fs::write(&path, data).unwrap();

        let store = FileStore::open(&path).unwrap();

        assert_eq!(store.subscribers(), vec![1]);
        assert_eq!(
            store.watermark("http://example.com/feed"),
            Utc.with_ymd_and_hms(2021, 3, 20, 5, 0, 0).unwrap()
        );

        // Opening an existing file must not rewrite it
        assert_eq!(fs::read_to_string(&path).unwrap(), data);
    }

    #[test]
    fn test_open_no_state_initializes_file() {
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);

        let store = FileStore::open(&path).unwrap();
        assert!(store.subscribers().is_empty());

        let expected = concat!(
            "{\n",
            "  \"subscribers\": [],\n",
            "  \"watermarks\": {}\n",
            "}"
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);

        // A second open reads the file it just created
        let reopened = FileStore::open(&path).unwrap();
        assert!(reopened.subscribers().is_empty());
        assert_eq!(
            reopened.watermark("http://example.com/feed"),
            DateTime::UNIX_EPOCH
        );
    }

    #[test]
    fn test_open_blank_state_left_untouched() {
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);
        fs::write(&path, "").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(store.subscribers().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_open_invalid_state() {
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);
        fs::write(&path, "]").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(err.to_string().starts_with("decode state:"), "{err}");
    }

    #[test]
    fn test_set_subscribers_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);
        let store = FileStore::open(&path).unwrap();

        store.set_subscribers(vec![1, 2, 3]).unwrap();
        assert_eq!(store.subscribers(), vec![1, 2, 3]);

        store.set_subscribers(vec![]).unwrap();
        assert_eq!(store.subscribers(), Vec::<i64>::new());

        store.set_subscribers(vec![5, 9]).unwrap();

        // Survives a restart
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.subscribers(), vec![5, 9]);
    }

    #[test]
    fn test_subscribers_returns_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(state_path(&dir)).unwrap();

        store.set_subscribers(vec![1]).unwrap();

        let mut snapshot = store.subscribers();
        snapshot.push(99);

        assert_eq!(store.subscribers(), vec![1]);
    }

    #[test]
    fn test_watermark_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);
        let store = FileStore::open(&path).unwrap();

        let ts1 = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let ts2 = ts1 + chrono::Duration::seconds(1);

        assert_eq!(store.watermark("feed"), DateTime::UNIX_EPOCH);

        store.set_watermark("feed", ts1).unwrap();
        assert_eq!(store.watermark("feed"), ts1);
        assert!(fs::read_to_string(&path)
            .unwrap()
            .contains("\"2000-01-01T00:00:00Z\""));

        store.set_watermark("feed", ts2).unwrap();
        assert_eq!(store.watermark("feed"), ts2);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.watermark("feed"), ts2);
        assert_eq!(reopened.watermark("other"), DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_concurrent_writes_keep_file_decodable() {
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);
        let store = Arc::new(FileStore::open(&path).unwrap());

        let handles: Vec<_> = (0..8u32)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    let at = Utc.with_ymd_and_hms(2020, 1, 1, i, 0, 0).unwrap();
                    store.set_watermark(&format!("feed-{i}"), at).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let reopened = FileStore::open(&path).unwrap();
        for i in 0..8u32 {
            assert_eq!(
                reopened.watermark(&format!("feed-{i}")),
                Utc.with_ymd_and_hms(2020, 1, 1, i, 0, 0).unwrap()
            );
        }
    }
}
