//! Virtual filesystem: the output side of the tree engine.
//!
//! A [`File`] holds fully rendered content (text or a binary payload), never a
//! markup tree. A [`Dir`] holds an ordered list of files and directories. Each
//! node's name is its path segment when the tree is written to disk.

/// Content of a virtual file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Binary(Vec<u8>),
}

impl Content {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Content::Text(text) => text.as_bytes(),
            Content::Binary(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Binary(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    name: String,
    content: Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dir {
    name: String,
    entries: Vec<Entry>,
}

/// Either node of the virtual filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File(File),
    Dir(Dir),
}

impl File {
    pub fn new(name: impl Into<String>, content: Content) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Files have no descendants, so this only checks the file's own name.
    pub fn contains(&self, name: &str) -> bool {
        self.name == name
    }
}

impl Dir {
    pub fn new(name: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// True if this directory, or anything below it, is called `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.name == name || self.entries.iter().any(|entry| entry.contains(name))
    }

    /// Direct child called `name`.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    /// First file called `name` at any depth, depth-first in entry order.
    pub fn find_file(&self, name: &str) -> Option<&File> {
        self.entries.iter().find_map(|entry| match entry {
            Entry::File(file) if file.name == name => Some(file),
            Entry::File(_) => None,
            Entry::Dir(dir) => dir.find_file(name),
        })
    }

    /// Overlay `other`'s entries onto this directory.
    ///
    /// Directories with the same name are merged recursively; a file in
    /// `other` replaces any entry of the same name. New entries are appended.
    /// The name of `other` itself is ignored.
    pub fn merge(mut self, other: Dir) -> Self {
        for entry in other.entries {
            let existing = self.entries.iter().position(|e| e.name() == entry.name());
            match (existing, entry) {
                (Some(pos), Entry::Dir(overlay)) => {
                    let merged = match self.entries.remove(pos) {
                        Entry::Dir(base) => base.merge(overlay),
                        Entry::File(_) => overlay,
                    };
                    self.entries.insert(pos, Entry::Dir(merged));
                }
                (Some(pos), file) => self.entries[pos] = file,
                (None, entry) => self.entries.push(entry),
            }
        }
        self
    }

    /// Number of files below this directory, at any depth.
    pub fn file_count(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| match entry {
                Entry::File(_) => 1,
                Entry::Dir(dir) => dir.file_count(),
            })
            .sum()
    }
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::File(file) => file.name(),
            Entry::Dir(dir) => dir.name(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        match self {
            Entry::File(file) => file.contains(name),
            Entry::Dir(dir) => dir.contains(name),
        }
    }
}

impl From<File> for Entry {
    fn from(file: File) -> Self {
        Entry::File(file)
    }
}

impl From<Dir> for Entry {
    fn from(dir: Dir) -> Self {
        Entry::Dir(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_file(name: &str, content: &str) -> Entry {
        Entry::File(File::new(name, Content::Text(content.to_string())))
    }

    fn nested() -> Dir {
        Dir::new(
            "site",
            vec![
                text_file("index.html", "<p />"),
                Entry::Dir(Dir::new(
                    "styles",
                    vec![Entry::Dir(Dir::new(
                        "fonts",
                        vec![text_file("KaTeX_Main-Regular.woff2", "")],
                    ))],
                )),
            ],
        )
    }

    #[test]
    fn file_contains_only_its_own_name() {
        let file = File::new("main.css", Content::Text(String::new()));
        assert!(file.contains("main.css"));
        assert!(!file.contains("main.js"));
    }

    #[test]
    fn dir_contains_itself() {
        assert!(nested().contains("site"));
    }

    #[test]
    fn dir_contains_deeply_nested_file() {
        let site = nested();
        assert!(site.contains("KaTeX_Main-Regular.woff2"));
        assert!(site.contains("fonts"));
        assert!(!site.contains("about.html"));
    }

    #[test]
    fn empty_dir_contains_only_itself() {
        let dir = Dir::new("posts", vec![]);
        assert!(dir.contains("posts"));
        assert!(!dir.contains("index.html"));
    }

    #[test]
    fn get_only_looks_at_direct_children() {
        let site = nested();
        assert!(site.get("styles").is_some());
        assert!(site.get("fonts").is_none());
    }

    #[test]
    fn find_file_searches_recursively() {
        let site = nested();
        let font = site.find_file("KaTeX_Main-Regular.woff2").unwrap();
        assert!(font.content().is_empty());
        assert!(site.find_file("fonts").is_none());
    }

    #[test]
    fn file_count_includes_nested_files() {
        assert_eq!(nested().file_count(), 2);
    }

    #[test]
    fn merge_adds_and_replaces_entries() {
        let assets = Dir::new(
            "assets",
            vec![
                text_file("index.html", "<main />"),
                text_file("robots.txt", ""),
                Entry::Dir(Dir::new(
                    "styles",
                    vec![Entry::Dir(Dir::new("fonts", vec![text_file("mono.woff2", "")]))],
                )),
            ],
        );
        let site = nested().merge(assets);

        assert_eq!(site.name(), "site");
        assert_eq!(site.entries().len(), 3);
        assert_eq!(
            site.find_file("index.html").unwrap().content().as_text(),
            Some("<main />")
        );
        assert!(site.contains("robots.txt"));
        assert!(site.contains("mono.woff2"));
        assert!(site.contains("KaTeX_Main-Regular.woff2"));
    }

    #[test]
    fn binary_content_exposes_bytes() {
        let content = Content::Binary(vec![0x89, b'P', b'N', b'G']);
        assert_eq!(content.as_bytes(), &[0x89, b'P', b'N', b'G']);
        assert_eq!(content.as_text(), None);
    }
}
