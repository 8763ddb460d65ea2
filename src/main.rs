use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use query_dispatcher::config::{AliasFileStore, AliasStore};
use query_dispatcher::parser::{parse_command, Command};
use query_dispatcher::url_compiler::{decode, CompileError, UrlCompiler};

const ALIAS_FILE: &str = "aliases.json";

fn main() -> Result<()> {
    println!("--- Query Dispatcher: 过滤命令到列表页 URL 编译器 ---");

    let mut store = load_alias_store();

    println!("\n输入查询命令, 例如: from user.profile where name ilike '%wei%'");
    println!("其他命令: alias <source> as <short> / decode <query> / exit\n");

    let mut editor = DefaultEditor::new()?;
    // 最近一次跳转的路径, 作为省略 from 子句时的当前作用域
    let mut current_path: Option<String> = None;

    loop {
        match editor.readline("query> ") {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    break;
                }
                let _ = editor.add_history_entry(&line);
                if let Err(error) = dispatch(&line, &mut store, &mut current_path) {
                    println!("✗ {}", error);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(error) => return Err(error.into()),
        }
    }

    Ok(())
}

/// 加载别名配置, 失败时使用空配置
fn load_alias_store() -> AliasFileStore {
    match AliasFileStore::from_json_file(ALIAS_FILE) {
        Ok(store) => {
            println!("✅ 成功加载 {} 个别名 ({})", store.aliases().len(), ALIAS_FILE);
            store
        }
        Err(error) => {
            println!("⚠️ 无法加载别名配置 ({}), 使用空配置", error);
            AliasFileStore::load_or_default(ALIAS_FILE)
        }
    }
}

/// 解析并执行一条输入命令
fn dispatch(
    line: &str,
    store: &mut AliasFileStore,
    current_path: &mut Option<String>,
) -> Result<()> {
    // decode 是外层辅助命令, 不属于过滤语法本身
    if let Some(rest) = line.strip_prefix("decode ") {
        println!("{}", decode(rest.trim()));
        return Ok(());
    }

    match parse_command(line)? {
        Command::Alias(pairs) => {
            for (short, target) in &pairs {
                store.set(short, target);
            }
            store.save()?;
            println!("✅ 已保存 {} 个别名", pairs.len());
        }
        Command::Query(parsed) => {
            let compiled = UrlCompiler::new(&*store).encode(&parsed)?;
            // 没有 from 子句时沿用当前作用域, 两者都没有则报错
            let path = match compiled.path.or_else(|| current_path.clone()) {
                Some(path) => path,
                None => return Err(CompileError::ScopeMissing.into()),
            };
            if compiled.query.is_empty() {
                println!("→ {}", path);
            } else {
                println!("→ {}?{}", path, compiled.query);
            }
            *current_path = Some(path);
        }
    }

    Ok(())
}
