//! Shared fixtures for the response header benchmarks.

#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    file: TestFile,
}

impl TestCase {
    pub const fn new(name: &'static str, file: TestFile) -> Self {
        Self { name, file }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }
}

/// A captured response header block, CRLF terminated lines ending in a blank line
#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    content: &'static str,
}

impl TestFile {
    pub const fn new(file_name: &'static str, content: &'static str) -> Self {
        Self { file_name, content }
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    /// Header lines as a transport would deliver them, each keeping its CRLF
    pub fn lines(&self) -> impl Iterator<Item = &'static [u8]> {
        self.content.as_bytes().split_inclusive(|b| *b == b'\n')
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }
}
