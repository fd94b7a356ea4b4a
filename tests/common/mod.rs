#![allow(dead_code)]

use apicov::errors::{Error, Result};
use apicov::CoverageTool;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Coverage tool double answering from a table keyed by artifact file name.
#[derive(Default)]
pub struct ScriptedTool {
    outputs: HashMap<String, String>,
}

impl ScriptedTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, artifact: &str, text: &str) -> Self {
        self.outputs.insert(artifact.to_string(), text.to_string());
        self
    }
}

impl CoverageTool for ScriptedTool {
    fn run(&self, artifact: &Path) -> Result<String> {
        let name = artifact
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.outputs
            .get(&name)
            .cloned()
            .ok_or_else(|| Error::tool(artifact, "exited with status 1"))
    }
}

pub fn write(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// Library tree with coverage-notes artifacts in two directories.
pub fn library_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "lib/encode.gcno", "");
    write(dir.path(), "lib/block.gcno", "");
    write(dir.path(), "lib/util/bits.gcno", "");
    dir
}

pub const ENCODE_REPORT: &str = "\
Function 'vorbis_encode_init'
Lines executed:0.00% of 0
Function 'vorbis_encode_setup'
Lines executed:80.00% of 20
File 'encode.c'
Lines executed:75.00% of 40
";

pub const BLOCK_REPORT: &str = "\
Function 'vorbis_block_init'
Lines executed:100.00% of 12
Function 'vorbis_encode_setup'
Lines executed:50.00% of 10
";

pub const BITS_REPORT: &str = "\
Function 'oggpack_write'
Lines executed:50.00% of 8
/usr/include/stdio.h:Cannot open source file
";
