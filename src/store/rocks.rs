use anyhow::Result as AnyResult;
use async_trait::async_trait;
use rocksdb::{Direction, IteratorMode, Options, DB};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::traits::SubmissionStore;
use crate::types::{NewPumpHistory, NewSubmission, PumpHistory, Submission, Vote};

use super::{build_pump_history, build_submission, build_vote, sort_submissions};

const SUB_PREFIX: &[u8] = b"sub/";
const ADDR_PREFIX: &[u8] = b"addr/";
const VOTE_PREFIX: &[u8] = b"vote/";
const HIST_PREFIX: &[u8] = b"hist/";

/// RocksDB-backed submission store.
///
/// Key layout (JSON-encoded values):
/// - `sub/{id}` -> Submission
/// - `addr/{contract_address}` -> submission id (uniqueness index)
/// - `vote/{submission_id}/{vote_id}` -> Vote
/// - `hist/{created_at_be}/{id}` -> PumpHistory (reverse scan = most recent
///   first)
pub struct RocksStore {
    db: DB,
}

impl RocksStore {
    pub fn open(path: &str) -> AnyResult<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path)?;
        Ok(Self { db })
    }

    fn sub_key(id: &str) -> Vec<u8> {
        [SUB_PREFIX, id.as_bytes()].concat()
    }

    fn addr_key(contract_address: &str) -> Vec<u8> {
        [ADDR_PREFIX, contract_address.as_bytes()].concat()
    }

    fn vote_scope(submission_id: &str) -> Vec<u8> {
        let mut key = [VOTE_PREFIX, submission_id.as_bytes()].concat();
        key.push(b'/');
        key
    }

    fn hist_key(created_at: u64, id: &str) -> Vec<u8> {
        let mut key = HIST_PREFIX.to_vec();
        key.extend_from_slice(&created_at.to_be_bytes());
        key.push(b'/');
        key.extend_from_slice(id.as_bytes());
        key
    }

    fn get_json<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>> {
        match self.db.get(key).map_err(anyhow::Error::from)? {
            Some(raw) => Ok(Some(
                serde_json::from_slice(&raw).map_err(anyhow::Error::from)?,
            )),
            None => Ok(None),
        }
    }

    fn put_json<T: Serialize>(&self, key: &[u8], value: &T) -> Result<()> {
        let raw = serde_json::to_vec(value).map_err(anyhow::Error::from)?;
        self.db.put(key, raw).map_err(anyhow::Error::from)?;
        Ok(())
    }

    /// Collect all values under a key prefix, in key order.
    fn scan_prefix<T: DeserializeOwned>(&self, prefix: &[u8]) -> Result<Vec<T>> {
        let iter = self
            .db
            .iterator(IteratorMode::From(prefix, Direction::Forward));
        let mut out = Vec::new();
        for item in iter {
            let (key, value) = item.map_err(anyhow::Error::from)?;
            if !key.starts_with(prefix) {
                break;
            }
            out.push(serde_json::from_slice(&value).map_err(anyhow::Error::from)?);
        }
        Ok(out)
    }
}

#[async_trait]
impl SubmissionStore for RocksStore {
    fn name(&self) -> &'static str {
        "rocks-store"
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>> {
        let mut out: Vec<Submission> = self.scan_prefix(SUB_PREFIX)?;
        sort_submissions(&mut out);
        Ok(out)
    }

    async fn find_submission(&self, id: &str) -> Result<Option<Submission>> {
        self.get_json(&Self::sub_key(id))
    }

    async fn find_by_address(&self, contract_address: &str) -> Result<Option<Submission>> {
        match self
            .db
            .get(Self::addr_key(contract_address))
            .map_err(anyhow::Error::from)?
        {
            Some(id) => self.get_json(&Self::sub_key(&String::from_utf8_lossy(&id))),
            None => Ok(None),
        }
    }

    async fn create_submission(&self, new: NewSubmission) -> Result<Submission> {
        let addr_key = Self::addr_key(&new.contract_address);
        if let Some(existing) = self.db.get(&addr_key).map_err(anyhow::Error::from)? {
            return Err(Error::DuplicateAddress {
                submission_id: String::from_utf8_lossy(&existing).into_owned(),
            });
        }
        let submission = build_submission(new);
        self.put_json(&Self::sub_key(&submission.id), &submission)?;
        self.db
            .put(addr_key, submission.id.as_bytes())
            .map_err(anyhow::Error::from)?;
        Ok(submission)
    }

    async fn update_vote_count(&self, id: &str, votes: u64) -> Result<()> {
        let key = Self::sub_key(id);
        if let Some(mut submission) = self.get_json::<Submission>(&key)? {
            submission.votes = votes;
            self.put_json(&key, &submission)?;
        }
        Ok(())
    }

    async fn record_vote(
        &self,
        submission_id: &str,
        voter_address: Option<String>,
    ) -> Result<Vote> {
        let vote = build_vote(submission_id, voter_address);
        let mut key = Self::vote_scope(submission_id);
        key.extend_from_slice(vote.id.as_bytes());
        self.put_json(&key, &vote)?;
        Ok(vote)
    }

    async fn votes_for(&self, submission_id: &str) -> Result<Vec<Vote>> {
        self.scan_prefix(&Self::vote_scope(submission_id))
    }

    async fn has_voted(&self, submission_id: &str, voter_address: &str) -> Result<bool> {
        let votes = self.votes_for(submission_id).await?;
        Ok(votes
            .iter()
            .any(|v| v.voter_address.as_deref() == Some(voter_address)))
    }

    async fn reset_all_votes(&self) -> Result<()> {
        let submissions: Vec<Submission> = self.scan_prefix(SUB_PREFIX)?;
        for mut submission in submissions {
            if submission.votes != 0 {
                submission.votes = 0;
                self.put_json(&Self::sub_key(&submission.id), &submission)?;
            }
        }
        Ok(())
    }

    async fn record_pump_history(&self, new: NewPumpHistory) -> Result<PumpHistory> {
        let entry = build_pump_history(new);
        self.put_json(&Self::hist_key(entry.created_at, &entry.id), &entry)?;
        Ok(entry)
    }

    async fn list_pump_history(&self) -> Result<Vec<PumpHistory>> {
        // Keys are ordered by big-endian created-at; reverse for recency.
        let mut out: Vec<PumpHistory> = self.scan_prefix(HIST_PREFIX)?;
        out.reverse();
        Ok(out)
    }
}
