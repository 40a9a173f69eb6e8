use std::collections::HashMap;

/// What a request token is scoped to. Responses are only applied when their
/// token is the newest one issued for the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum RequestKey {
    FolderList,
    TopicList,
    /// Rename and delete of a single folder record.
    Folder(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RequestToken {
    pub key: RequestKey,
    pub seq: u64,
}

/// Monotonic request tokens, one latest sequence number per key.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct RequestTokens {
    next_seq: u64,
    latest: HashMap<RequestKey, u64>,
}

impl RequestTokens {
    pub fn issue(&mut self, key: RequestKey) -> RequestToken {
        self.next_seq = self.next_seq.saturating_add(1);
        self.latest.insert(key.clone(), self.next_seq);
        RequestToken {
            key,
            seq: self.next_seq,
        }
    }

    pub fn is_latest(&self, token: &RequestToken) -> bool {
        self.latest.get(&token.key) == Some(&token.seq)
    }

    /// Consumes a response token. Returns `true` if the response should be
    /// applied; the key is then no longer pending.
    pub fn settle(&mut self, token: &RequestToken) -> bool {
        if !self.is_latest(token) {
            return false;
        }
        self.latest.remove(&token.key);
        true
    }

    /// Invalidates any in-flight request for `key`.
    pub fn cancel(&mut self, key: &RequestKey) {
        self.latest.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_monotonic_across_keys() {
        let mut t = RequestTokens::default();
        let a = t.issue(RequestKey::FolderList);
        let b = t.issue(RequestKey::TopicList);
        assert!(b.seq > a.seq);
        assert!(t.is_latest(&a));
        assert!(t.is_latest(&b));
    }

    #[test]
    fn test_newer_token_supersedes_older_for_same_key() {
        let mut t = RequestTokens::default();
        let first = t.issue(RequestKey::Folder("f1".into()));
        let second = t.issue(RequestKey::Folder("f1".into()));

        assert!(!t.settle(&first));
        assert!(t.settle(&second));
        // Settled once; a duplicate response is dropped.
        assert!(!t.settle(&second));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut t = RequestTokens::default();
        let f1 = t.issue(RequestKey::Folder("f1".into()));
        let f2 = t.issue(RequestKey::Folder("f2".into()));
        assert!(t.settle(&f1));
        assert!(!t.is_latest(&f1));
        assert!(t.is_latest(&f2));
    }

    #[test]
    fn test_cancel_drops_in_flight_response() {
        let mut t = RequestTokens::default();
        let topics = t.issue(RequestKey::TopicList);
        t.cancel(&RequestKey::TopicList);
        assert!(!t.settle(&topics));
    }
}
