use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tree_sitter::{Language, Node as TSNode, Parser, Tree};

use super::ExtractError;

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new(language: Language) -> Result<Self, ExtractError> {
        let mut parser = Parser::new();
        parser.set_language(language)?;
        Ok(Self { parser })
    }

    pub fn parse(&mut self, source: &str, root: &str) -> Result<Tree, ExtractError> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| ExtractError::Parse {
                root: root.to_string(),
            })
    }

    /// Buffered file read sized to the file, small files in one go.
    pub fn read_source(path: &Path) -> Result<String, ExtractError> {
        let io_err = |source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let file_size = file.metadata().map_err(io_err)?.len() as usize;

        let mut reader =
            BufReader::with_capacity(if file_size < 8192 { file_size.max(1) } else { 8192 }, file);
        let mut content = String::with_capacity(file_size);
        reader.read_to_string(&mut content).map_err(io_err)?;
        Ok(content)
    }
}

pub fn node_text<'a>(node: &TSNode, source: &'a [u8]) -> &'a str {
    std::str::from_utf8(&source[node.byte_range()]).unwrap_or("")
}
