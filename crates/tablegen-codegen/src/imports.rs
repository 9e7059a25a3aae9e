use std::collections::BTreeMap;

/// Write-only import accumulator for one table's generation run.
///
/// Callers own one instance per table and merge explicitly; nothing here is
/// shared across tables, so concurrent base generation cannot contaminate
/// another table's import list. Rendering is sorted for deterministic output.
#[derive(Debug, Default)]
pub struct Imports {
    /// module path -> imported symbols
    entries: BTreeMap<String, Vec<String>>,
}

impl Imports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, module: &str, symbol: &str) {
        let symbols = self.entries.entry(module.to_string()).or_default();
        if !symbols.iter().any(|existing| existing == symbol) {
            symbols.push(symbol.to_string());
        }
    }

    pub fn merge(&mut self, other: Imports) {
        for (module, symbols) in other.entries {
            for symbol in symbols {
                self.add(&module, &symbol);
            }
        }
    }

    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(module, symbols)| {
                let mut symbols = symbols.clone();
                symbols.sort();
                format!("import {{ {} }} from \"{module}\";", symbols.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
