//! Minimal TypeScript source writer.
//!
//! Collects named imports and package dependencies alongside body lines and
//! renders them as a module. Imports are grouped per module, sorted and
//! de-duplicated so fragments from several decisions can share one writer.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::emit::dependency::PackageDependency;

/// A named import: `import { name as alias } from "module"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Import {
    pub name: String,
    pub alias: String,
    pub module: String,
}

impl Import {
    /// Create an import that binds `name` under `alias`.
    pub fn new(name: &str, alias: &str, module: &str) -> Self {
        Import {
            name: name.to_string(),
            alias: alias.to_string(),
            module: module.to_string(),
        }
    }

    fn specifier(&self) -> String {
        if self.name == self.alias {
            self.name.clone()
        } else {
            format!("{} as {}", self.name, self.alias)
        }
    }
}

/// Accumulates a TypeScript module.
#[derive(Debug, Clone, Default)]
pub struct TypeScriptWriter {
    imports: BTreeMap<String, BTreeSet<Import>>,
    dependencies: BTreeSet<PackageDependency>,
    lines: Vec<String>,
    indent: usize,
}

impl TypeScriptWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        TypeScriptWriter::default()
    }

    /// Record a named import.
    pub fn add_import(&mut self, import: Import) -> &mut Self {
        self.imports
            .entry(import.module.clone())
            .or_default()
            .insert(import);
        self
    }

    /// Record a package the written code depends on.
    pub fn add_dependency(&mut self, dependency: PackageDependency) -> &mut Self {
        self.dependencies.insert(dependency);
        self
    }

    /// Write a line at the current indentation. Embedded newlines are kept
    /// as separate lines.
    pub fn write(&mut self, text: &str) -> &mut Self {
        let pad = "  ".repeat(self.indent);
        for line in text.split('\n') {
            if line.is_empty() {
                self.lines.push(String::new());
            } else {
                self.lines.push(format!("{}{}", pad, line));
            }
        }
        self
    }

    /// Write a JSDoc block.
    pub fn write_docs(&mut self, docs: &str) -> &mut Self {
        self.write("/**");
        for line in docs.lines() {
            if line.is_empty() {
                self.write(" *");
            } else {
                self.write(&format!(" * {}", line));
            }
        }
        self.write(" */")
    }

    /// Increase indentation for following lines.
    pub fn indent(&mut self) -> &mut Self {
        self.indent += 1;
        self
    }

    /// Decrease indentation for following lines.
    pub fn dedent(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        self
    }

    /// Get the recorded dependencies.
    pub fn dependencies(&self) -> impl Iterator<Item = &PackageDependency> + '_ {
        self.dependencies.iter()
    }

    /// Render imports followed by the body.
    pub fn render(&self) -> String {
        let mut out = String::new();

        for (module, imports) in &self.imports {
            let specifiers: Vec<String> = imports.iter().map(Import::specifier).collect();
            out.push_str(&format!(
                "import {{ {} }} from \"{}\";\n",
                specifiers.join(", "),
                module
            ));
        }

        if !self.imports.is_empty() && !self.lines.is_empty() {
            out.push('\n');
        }

        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::dependency::{AWS_SDK_TYPES, STS_CLIENT};

    #[test]
    fn test_imports_grouped_and_sorted() {
        let mut writer = TypeScriptWriter::new();
        writer
            .add_import(Import::new("Provider", "__Provider", "@aws-sdk/types"))
            .add_import(Import::new("Credentials", "__Credentials", "@aws-sdk/types"))
            .add_import(Import::new("Credentials", "__Credentials", "@aws-sdk/types"))
            .add_import(Import::new("foo", "foo", "./local"))
            .write("export const x = 1;");

        assert_eq!(
            writer.render(),
            "import { foo } from \"./local\";\n\
             import { Credentials as __Credentials, Provider as __Provider } from \"@aws-sdk/types\";\n\
             \n\
             export const x = 1;\n"
        );
    }

    #[test]
    fn test_write_docs_and_indent() {
        let mut writer = TypeScriptWriter::new();
        writer
            .write("export const config = {")
            .indent()
            .write_docs("First line.\n\nThird line.")
            .write("a: 1,")
            .dedent()
            .write("};");

        assert_eq!(
            writer.render(),
            "export const config = {\n  /**\n   * First line.\n   *\n   * Third line.\n   */\n  a: 1,\n};\n"
        );
    }

    #[test]
    fn test_dependencies_deduplicated() {
        let mut writer = TypeScriptWriter::new();
        writer
            .add_dependency(STS_CLIENT)
            .add_dependency(AWS_SDK_TYPES)
            .add_dependency(STS_CLIENT);
        let deps: Vec<_> = writer.dependencies().map(|d| d.package).collect();
        assert_eq!(deps, vec!["@aws-sdk/client-sts", "@aws-sdk/types"]);
    }

    #[test]
    fn test_empty_writer_renders_nothing() {
        assert_eq!(TypeScriptWriter::new().render(), "");
    }
}
