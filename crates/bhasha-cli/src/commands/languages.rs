//! `bhasha languages` -- print the selectable languages.

use comfy_table::{Table, presets::UTF8_FULL};

use bhasha_types::language::SUPPORTED_LANGUAGES;

pub fn render() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["CODE", "LANGUAGE", "NATIVE"]);
    for lang in SUPPORTED_LANGUAGES {
        table.add_row([lang.code, lang.name, lang.native]);
    }
    table
}

pub fn list() {
    println!("{}", render());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_language() {
        let text = render().to_string();
        for lang in SUPPORTED_LANGUAGES {
            assert!(text.contains(lang.code));
            assert!(text.contains(lang.name));
        }
    }
}
