//! 食堂設定の編集
//!
//! 単発コマンド（add/set/remove）と対話式エディタの両方を提供する。
//! どちらも作業コピー（HallEditor）上で変更し、検証が通ったときだけ保存する。

use crate::error::{OrganizerError, Result};
use crate::store::SettingsStore;
use dialoguer::{Confirm, Input, Select};
use organizer_common::{HallEditor, HallField, HallSetting};

/// 一覧表示用の表を作る。`highlights` のセルには `!` を付ける
pub fn render_table(rows: &[HallSetting], highlights: &[(usize, HallField)]) -> String {
    if rows.is_empty() {
        return "食堂が登録されていません。追加してください".to_string();
    }

    let mark = |row: usize, field: HallField, value: &str| {
        if highlights.contains(&(row, field)) {
            format!("!{}", value)
        } else {
            value.to_string()
        }
    };

    let cells: Vec<[String; 3]> = rows
        .iter()
        .enumerate()
        .map(|(i, h)| {
            [
                mark(i, HallField::Name, &h.name),
                mark(i, HallField::Key, &h.key),
                mark(i, HallField::Folder, &h.folder),
            ]
        })
        .collect();

    let headers = ["Dining Hall Name", "Key Phrase", "Folder Name"];
    let widths: Vec<usize> = (0..3)
        .map(|col| {
            cells
                .iter()
                .map(|c| c[col].chars().count())
                .chain(std::iter::once(headers[col].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |prefix: &str, values: [&str; 3]| {
        format!(
            "{:>2}  {:<w0$}  {:<w1$}  {}",
            prefix,
            values[0],
            values[1],
            values[2],
            w0 = widths[0],
            w1 = widths[1]
        )
        .trim_end()
        .to_string()
    };

    let mut out = vec![line("", headers)];
    for (i, c) in cells.iter().enumerate() {
        out.push(line(&(i + 1).to_string(), [c[0].as_str(), c[1].as_str(), c[2].as_str()]));
    }
    out.join("\n")
}

pub fn list_halls(store: &SettingsStore) -> Result<()> {
    let table = store.load()?;
    println!("{}", render_table(table.rows(), &[]));
    Ok(())
}

pub fn add_hall(store: &SettingsStore, name: &str, key: &str, folder: &str) -> Result<()> {
    let mut editor = HallEditor::new(store.load()?);
    editor.add(name, key, folder)?;
    store.save(editor.save()?)?;
    println!("✔ {} has been added to your Halls!", name.trim());
    Ok(())
}

pub fn set_hall(
    store: &SettingsStore,
    name: &str,
    key: Option<&str>,
    folder: Option<&str>,
) -> Result<()> {
    let mut editor = HallEditor::new(store.load()?);
    editor.edit(name, key, folder)?;
    save_or_report(store, &mut editor)?;
    println!("✔ Saved!");
    Ok(())
}

pub fn remove_hall(store: &SettingsStore, name: &str) -> Result<()> {
    let mut editor = HallEditor::new(store.load()?);
    editor.delete(name)?;
    save_or_report(store, &mut editor)?;
    println!("✔ {} を削除しました", name);
    Ok(())
}

/// 保存に失敗したら該当行を示した表を出してからエラーを返す
fn save_or_report(store: &SettingsStore, editor: &mut HallEditor) -> Result<()> {
    if let Err(e) = editor.save().map(|_| ()) {
        eprintln!("{}", render_table(editor.rows(), &e.offending_cells()));
        return Err(e.into());
    }
    store.save(editor.saved())
}

/// 対話アクション
enum HallAction {
    Add,
    Edit,
    Delete,
    Save,
    Quit,
}

const ACTIONS: &[&str] = &["追加", "編集", "削除", "保存", "終了"];

/// 対話式で食堂設定を編集
pub fn run_interactive(store: &SettingsStore) -> Result<()> {
    let mut editor = HallEditor::new(store.load()?);
    let mut highlights: Vec<(usize, HallField)> = Vec::new();

    println!("🍽  Dining Hall Settings ({})", store.path().display());
    println!("---");

    loop {
        println!("{}\n", render_table(editor.rows(), &highlights));

        match prompt_action()? {
            HallAction::Add => {
                let name = prompt_text("Dining Hall Name", None)?;
                let key = prompt_text("Key Phrase", None)?;
                let folder = prompt_text("Folder Name", None)?;
                match editor.add(&name, &key, &folder) {
                    Ok(()) => println!("  → {} has been added to your Halls!\n", name.trim()),
                    Err(e) => println!("  ✗ {}\n", e),
                }
            }
            HallAction::Edit => {
                let Some(idx) = prompt_row(&editor, "編集する食堂")? else {
                    continue;
                };
                let current = editor.rows()[idx].clone();
                let key = prompt_text("Key Phrase", Some(&current.key))?;
                let folder = prompt_text("Folder Name", Some(&current.folder))?;
                editor.edit(&current.name, Some(&key), Some(&folder))?;
                println!("  → 未保存の変更があります\n");
            }
            HallAction::Delete => {
                let Some(idx) = prompt_row(&editor, "削除する食堂")? else {
                    continue;
                };
                let name = editor.rows()[idx].name.clone();
                editor.delete(&name)?;
                highlights.clear();
                println!("  → {} を削除（保存するまで確定しません）\n", name);
            }
            HallAction::Save => match editor.save() {
                Ok(table) => {
                    store.save(table)?;
                    highlights.clear();
                    println!("  ✔ Saved!\n");
                }
                Err(e) => {
                    highlights = e.offending_cells();
                    println!("  ✗ {}\n", e);
                }
            },
            HallAction::Quit => {
                if editor.is_dirty() && !confirm("未保存の変更を破棄して終了しますか?")? {
                    continue;
                }
                break;
            }
        }
    }

    Ok(())
}

fn prompt_action() -> Result<HallAction> {
    let choice = Select::new()
        .with_prompt("操作")
        .items(ACTIONS)
        .default(0)
        .interact()
        .map_err(|e| OrganizerError::Prompt(e.to_string()))?;

    Ok(match choice {
        0 => HallAction::Add,
        1 => HallAction::Edit,
        2 => HallAction::Delete,
        3 => HallAction::Save,
        _ => HallAction::Quit,
    })
}

fn prompt_row(editor: &HallEditor, prompt: &str) -> Result<Option<usize>> {
    if editor.rows().is_empty() {
        println!("  → 食堂がありません\n");
        return Ok(None);
    }
    let names: Vec<&str> = editor.rows().iter().map(|h| h.name.as_str()).collect();
    Select::new()
        .with_prompt(prompt)
        .items(&names)
        .default(0)
        .interact_opt()
        .map_err(|e| OrganizerError::Prompt(e.to_string()))
}

fn prompt_text(prompt: &str, initial: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(initial) = initial {
        input = input.with_initial_text(initial);
    }
    input
        .interact_text()
        .map_err(|e| OrganizerError::Prompt(e.to_string()))
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| OrganizerError::Prompt(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use organizer_common::HallTable;
    use tempfile::tempdir;

    fn store_with_halls() -> (tempfile::TempDir, SettingsStore) {
        let dir = tempdir().unwrap();
        let store = SettingsStore::open(dir.path().join("save_info.json")).unwrap();
        let mut table = HallTable::new();
        table.add("Dietrick", "DX", "Dietrick Hall").unwrap();
        table.add("Owens", "Owens", "Owens Food Court").unwrap();
        store.save(&table).unwrap();
        (dir, store)
    }

    #[test]
    fn test_render_empty_table() {
        assert!(render_table(&[], &[]).contains("登録されていません"));
    }

    #[test]
    fn test_render_table_marks_highlights() {
        let rows = vec![
            HallSetting::new("Dietrick", "DX", "Dietrick Hall"),
            HallSetting::new("Owens", "DX", "Owens Food Court"),
        ];
        let out = render_table(&rows, &[(0, HallField::Key), (1, HallField::Key)]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Key Phrase"));
        assert!(lines[1].starts_with(" 1"));
        assert!(lines[1].contains("!DX"));
        assert!(lines[2].contains("!DX"));
        assert!(!out.contains("!Owens Food Court"));
    }

    #[test]
    fn test_render_blank_row_from_settings_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("save_info.json");
        std::fs::write(&path, r#"{"": ["", ""]}"#).unwrap();
        let store = SettingsStore::open(&path).unwrap();

        let out = render_table(store.load().unwrap().rows(), &[]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], " 1");
    }

    #[test]
    fn test_add_hall_persists() {
        let (_dir, store) = store_with_halls();
        add_hall(&store, " Turner ", "TP", "Turner Place").unwrap();
        let table = store.load().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("Turner").unwrap().folder, "Turner Place");
    }

    #[test]
    fn test_add_hall_invalid_leaves_file_untouched() {
        let (_dir, store) = store_with_halls();
        let before = std::fs::read_to_string(store.path()).unwrap();
        assert!(add_hall(&store, "Turner", "DX", "Turner Place").is_err());
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn test_set_hall_duplicate_folder_fails() {
        let (_dir, store) = store_with_halls();
        let err = set_hall(&store, "Owens", None, Some("Dietrick Hall")).unwrap_err();
        assert!(err.to_string().contains("must be unique"));
        assert_eq!(
            store.load().unwrap().get("Owens").unwrap().folder,
            "Owens Food Court"
        );
    }

    #[test]
    fn test_remove_hall() {
        let (_dir, store) = store_with_halls();
        remove_hall(&store, "Owens").unwrap();
        assert!(store.load().unwrap().get("Owens").is_none());
        assert!(remove_hall(&store, "Owens").is_err());
    }
}
