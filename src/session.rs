// ---------------------------------------------------------------------------
// Session store: uploaded file name → raw bytes
// ---------------------------------------------------------------------------

/// In-memory store of the files loaded this session, in upload order.
///
/// The analysis core only ever reads from it; the UI owns its lifecycle.
/// Single-threaded by design: adds and removes all happen on the UI thread.
#[derive(Debug, Default)]
pub struct SessionStore {
    files: Vec<(String, Vec<u8>)>,
}

impl SessionStore {
    /// Add a file, replacing any previous content under the same name.
    pub fn add(&mut self, name: String, bytes: Vec<u8>) {
        if let Some(entry) = self.files.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = bytes;
        } else {
            self.files.push((name, bytes));
        }
    }

    /// Remove a file by name.  Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.files.len();
        self.files.retain(|(n, _)| n != name);
        self.files.len() != before
    }

    /// File names in upload order.
    pub fn names(&self) -> Vec<String> {
        self.files.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, bytes)| bytes.as_slice())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
