use super::languages::{LANGUAGE_NAMES, LanguageConfig};
use super::{SymbolError, SymbolNode};
use crate::document::{Position, Range};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tree_sitter::{Language, Node, Parser, Point, Query, QueryCursor, StreamingIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Role {
    Function,
    Container,
    Other,
}

impl Role {
    fn from_capture(name: &str) -> Option<Self> {
        match name {
            "function" | "method" => Some(Role::Function),
            "class" | "interface" | "container" => Some(Role::Container),
            "struct" => Some(Role::Other),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Declaration {
    name: String,
    role: Role,
    start_byte: usize,
    end_byte: usize,
    range: Range,
}

struct CompiledLanguage {
    language: Language,
    query: Query,
    wrapper_kinds: &'static [&'static str],
}

/// Document-symbol provider backed by tree-sitter.
pub struct SymbolParser {
    languages: HashMap<&'static str, CompiledLanguage>,
}

impl SymbolParser {
    /// Parser for every supported language.
    pub fn new() -> Result<Self, SymbolError> {
        Self::with_languages(&LANGUAGE_NAMES)
    }

    /// Parser restricted to the named languages.
    pub fn with_languages<S: AsRef<str>>(names: &[S]) -> Result<Self, SymbolError> {
        let mut languages = HashMap::new();
        for name in names {
            let name = name.as_ref();
            let config = LanguageConfig::get_by_name(name)
                .ok_or_else(|| SymbolError::UnsupportedLanguage(name.to_string()))?;
            let query = Query::new(&config.language, config.query)?;
            languages.insert(
                config.name,
                CompiledLanguage {
                    language: config.language,
                    query,
                    wrapper_kinds: config.wrapper_kinds,
                },
            );
        }
        Ok(Self { languages })
    }

    /// Name of the enabled language handling `path`, chosen by extension.
    pub fn language_for_path(&self, path: &Path) -> Result<&'static str, SymbolError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        LanguageConfig::get_by_extension(ext)
            .map(|c| c.name)
            .filter(|name| self.languages.contains_key(name))
            .ok_or_else(|| SymbolError::UnsupportedFileType(ext.to_string()))
    }

    pub fn parse_file<P: AsRef<Path>>(&self, filepath: P) -> Result<Vec<SymbolNode>, SymbolError> {
        let filepath = filepath.as_ref();
        let lang = self.language_for_path(filepath)?;
        let source = std::fs::read_to_string(filepath)?;
        self.parse_source(&source, lang)
    }

    /// Build the symbol tree of `source`. Ranges are zero-based with
    /// character (not byte) columns.
    pub fn parse_source(&self, source: &str, lang: &str) -> Result<Vec<SymbolNode>, SymbolError> {
        let compiled = self
            .languages
            .get(lang)
            .ok_or_else(|| SymbolError::UnsupportedLanguage(lang.to_string()))?;

        let mut parser = Parser::new();
        parser.set_language(&compiled.language)?;
        let tree = parser.parse(source, None).ok_or(SymbolError::ParseFailed)?;

        let mut declarations = collect_declarations(compiled, tree.root_node(), source);
        declarations.sort_by(|a, b| {
            a.start_byte
                .cmp(&b.start_byte)
                .then(b.end_byte.cmp(&a.end_byte))
        });

        let mut idx = 0;
        Ok(nest_within(&declarations, &mut idx, usize::MAX))
    }
}

fn collect_declarations(compiled: &CompiledLanguage, root: Node, source: &str) -> Vec<Declaration> {
    let query = &compiled.query;
    let line_starts: Vec<usize> = std::iter::once(0)
        .chain(source.match_indices('\n').map(|(i, _)| i + 1))
        .collect();

    let mut cursor = QueryCursor::new();
    let mut declarations = Vec::new();
    let mut seen = HashSet::new();

    let mut matches = cursor.matches(query, root, source.as_bytes());
    while let Some(m) = matches.next() {
        let mut main_node = None;
        let mut name = String::new();

        for cap in m.captures {
            let capture_name = query.capture_names()[cap.index as usize];
            if capture_name == "name" {
                if let Ok(text) = cap.node.utf8_text(source.as_bytes()) {
                    name = text.to_string();
                }
            } else if let Some(role) = Role::from_capture(capture_name) {
                main_node = Some((cap.node, role));
            }
        }

        let Some((node, role)) = main_node else {
            continue;
        };
        let node = widen(node, compiled.wrapper_kinds);
        if !seen.insert((node.start_byte(), node.end_byte(), role)) {
            continue;
        }

        let range = Range::new(
            to_position(source, &line_starts, node.start_position()),
            to_position(source, &line_starts, node.end_position()),
        );
        declarations.push(Declaration {
            name,
            role,
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            range,
        });
    }

    declarations
}

/// Grow `node` over the `export`/decorator nodes wrapping it.
fn widen<'t>(mut node: Node<'t>, wrapper_kinds: &[&str]) -> Node<'t> {
    while let Some(parent) = node.parent() {
        if !wrapper_kinds.contains(&parent.kind()) {
            break;
        }
        node = parent;
    }
    node
}

/// tree-sitter columns are byte offsets; documents count characters.
fn to_position(source: &str, line_starts: &[usize], point: Point) -> Position {
    let line_start = line_starts.get(point.row).copied().unwrap_or(0);
    let character = source
        .get(line_start..line_start + point.column)
        .map(|prefix| prefix.chars().count())
        .unwrap_or(point.column);
    Position::new(point.row as u32, character as u32)
}

/// Consume the declarations that fit within `end_byte` and nest them.
/// Only containers keep their nested declarations.
fn nest_within(declarations: &[Declaration], idx: &mut usize, end_byte: usize) -> Vec<SymbolNode> {
    let mut nodes = Vec::new();
    while let Some(decl) = declarations.get(*idx) {
        if decl.start_byte >= end_byte || decl.end_byte > end_byte {
            break;
        }
        *idx += 1;

        let node = match decl.role {
            Role::Container => {
                let children = nest_within(declarations, idx, decl.end_byte);
                SymbolNode::container(&decl.name, decl.range, children)
            }
            Role::Function => {
                skip_within(declarations, idx, decl.end_byte);
                SymbolNode::function(&decl.name, decl.range)
            }
            Role::Other => {
                skip_within(declarations, idx, decl.end_byte);
                SymbolNode::other(&decl.name, decl.range)
            }
        };
        nodes.push(node);
    }
    nodes
}

fn skip_within(declarations: &[Declaration], idx: &mut usize, end_byte: usize) {
    while declarations
        .get(*idx)
        .is_some_and(|d| d.start_byte < end_byte && d.end_byte <= end_byte)
    {
        *idx += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::enclosing_block;
    use crate::symbols::SymbolKind;

    fn names(nodes: &[SymbolNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_parse_rust_code() {
        let parser = SymbolParser::new().expect("Failed to initialize SymbolParser");
        let source_code = r#"
struct MyStruct {
    field: i32,
}

impl MyStruct {
    fn my_method(&self) {
        fn helper() {}
        println!("Hello");
    }
}

fn my_function() {}
"#;

        let symbols = parser
            .parse_source(source_code, "rust")
            .expect("Failed to parse Rust code");

        assert_eq!(names(&symbols), vec!["MyStruct", "MyStruct", "my_function"]);
        assert_eq!(symbols[0].kind, SymbolKind::Other);

        let methods = symbols[1].children();
        assert_eq!(names(methods), vec!["my_method"]);
        assert_eq!(methods[0].kind, SymbolKind::Function);
        assert_eq!(methods[0].range.start, Position::new(6, 4));
        assert_eq!(methods[0].range.end, Position::new(9, 5));

        assert_eq!(symbols[2].kind, SymbolKind::Function);
        assert_eq!(symbols[2].range.start, Position::new(12, 0));
    }

    #[test]
    fn test_parse_python_code() {
        let parser = SymbolParser::new().unwrap();
        let source_code = r#"
class MyClass:
    def my_method(self):
        print("Hello")

def my_function():
    pass
"#;

        let symbols = parser.parse_source(source_code, "python").unwrap();
        assert_eq!(names(&symbols), vec!["MyClass", "my_function"]);
        assert!(matches!(symbols[0].kind, SymbolKind::Container { .. }));
        assert_eq!(names(symbols[0].children()), vec!["my_method"]);
    }

    #[test]
    fn test_parse_typescript_arrow_function() {
        let parser = SymbolParser::new().unwrap();
        let source_code = "const total = (x: number) => {\n  return x;\n};\n";

        let symbols = parser.parse_source(source_code, "typescript").unwrap();
        assert_eq!(names(&symbols), vec!["total"]);
        assert_eq!(symbols[0].kind, SymbolKind::Function);
        assert_eq!(symbols[0].range.start.line, 0);
        assert_eq!(symbols[0].range.end.line, 2);
    }

    #[test]
    fn test_export_covers_keyword() {
        let parser = SymbolParser::new().unwrap();
        let source_code = "export function main(x: number) {\n  let total = computeScore(x)\n}\n\nexport class Report {\n  render() {}\n}\n";

        let symbols = parser.parse_source(source_code, "typescript").unwrap();
        assert_eq!(names(&symbols), vec!["main", "Report"]);
        assert_eq!(symbols[0].range.start, Position::new(0, 0));
        assert_eq!(symbols[1].range.start, Position::new(4, 0));
        assert_eq!(names(symbols[1].children()), vec!["render"]);
        assert_eq!(
            enclosing_block(Position::new(0, 0), &symbols),
            Some(symbols[0].range)
        );
    }

    #[test]
    fn test_function_expression_assignments() {
        let parser = SymbolParser::new().unwrap();
        let source_code = "const main = function (x: number) {\n  let total = computeScore(x)\n};\nvar legacy = function () {\n  return 1;\n};\n";

        let symbols = parser.parse_source(source_code, "typescript").unwrap();
        assert_eq!(names(&symbols), vec!["main", "legacy"]);
        assert!(symbols.iter().all(|s| s.kind == SymbolKind::Function));
        assert_eq!(
            enclosing_block(Position::new(1, 2), &symbols),
            Some(symbols[0].range)
        );

        let js = parser
            .parse_source("export const run = function () {\n  go();\n};\n", "javascript")
            .unwrap();
        assert_eq!(names(&js), vec!["run"]);
        assert_eq!(js[0].range.start, Position::new(0, 0));
    }

    #[test]
    fn test_abstract_class_is_container() {
        let parser = SymbolParser::new().unwrap();
        let source_code = "abstract class Shape {\n  describe() {\n    return 'shape';\n  }\n}\n";

        let symbols = parser.parse_source(source_code, "typescript").unwrap();
        assert_eq!(names(&symbols), vec!["Shape"]);
        assert!(matches!(symbols[0].kind, SymbolKind::Container { .. }));
        assert_eq!(names(symbols[0].children()), vec!["describe"]);
    }

    #[test]
    fn test_python_decorator_inside_range() {
        let parser = SymbolParser::new().unwrap();
        let source_code = "@cached\ndef load():\n    return 1\n\nclass Api:\n    @property\n    def name(self):\n        return 'api'\n";

        let symbols = parser.parse_source(source_code, "python").unwrap();
        assert_eq!(names(&symbols), vec!["load", "Api"]);
        assert_eq!(symbols[0].range.start, Position::new(0, 0));

        let methods = symbols[1].children();
        assert_eq!(names(methods), vec!["name"]);
        assert_eq!(methods[0].range.start, Position::new(5, 4));
    }

    #[test]
    fn test_go_func_literals() {
        let parser = SymbolParser::new().unwrap();
        let source_code = "package main\n\nvar handler = func() {\n\tserve()\n}\n\nfunc main() {\n\tf := func() {\n\t\tstep()\n\t}\n\tf()\n}\n";

        let symbols = parser.parse_source(source_code, "go").unwrap();
        // The closure inside main belongs to main
        assert_eq!(names(&symbols), vec!["handler", "main"]);
        assert!(symbols.iter().all(|s| s.kind == SymbolKind::Function));
        assert_eq!(
            enclosing_block(Position::new(3, 1), &symbols),
            Some(symbols[0].range)
        );
        assert_eq!(
            enclosing_block(Position::new(8, 2), &symbols),
            Some(symbols[1].range)
        );
    }

    #[test]
    fn test_character_columns() {
        let parser = SymbolParser::new().unwrap();
        // "é" is two bytes but one character
        let source_code = "/* é */ fn f() {}\n";
        let symbols = parser.parse_source(source_code, "rust").unwrap();
        assert_eq!(symbols[0].range.start, Position::new(0, 8));
    }

    #[test]
    fn test_unsupported_file_type() {
        let parser = SymbolParser::new().unwrap();
        let err = parser.language_for_path(Path::new("notes.md")).unwrap_err();
        assert!(matches!(err, SymbolError::UnsupportedFileType(ext) if ext == "md"));
    }

    #[test]
    fn test_disabled_language_rejected() {
        let parser = SymbolParser::with_languages(&["python"]).unwrap();
        assert!(parser.language_for_path(Path::new("main.rs")).is_err());
        assert!(parser.parse_source("fn f() {}", "rust").is_err());
        assert!(SymbolParser::with_languages(&["cobol"]).is_err());
    }
}
