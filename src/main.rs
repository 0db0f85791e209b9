use anyhow::Context;
use applicant_organizer::{browser, cli, config, error, hall_editor, network, sorter, store};
use browser::BrowserSession;
use clap::Parser;
use cli::{Cli, Commands, HallsCommand};
use config::Config;
use error::OrganizerError;
use indicatif::{ProgressBar, ProgressStyle};
use network::HttpProbe;
use organizer_common::AbortReason;
use sorter::SortOptions;
use store::SettingsStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load().context("設定ファイルを読み込めません")?;

    match cli.command {
        Commands::Sort { source, dest, all_folders, no_log, offline } => {
            println!("📂 applicant-organizer - 仕分け\n");

            let settings = SettingsStore::open_default()?;
            let halls = settings
                .load()
                .with_context(|| format!("食堂設定: {}", settings.path().display()))?;
            if halls.is_empty() {
                println!("⚠ {}\n", OrganizerError::NoHalls);
            }

            let probe = HttpProbe::from_config(&config)?;
            let mut session = if offline {
                None
            } else {
                config.ensure_survey_url()?;
                Some(BrowserSession::from_config(&config)?)
            };

            let options = SortOptions {
                create_all_folders: all_folders || config.create_all_folders,
                check_connection: !offline,
            };
            let log_time = (config.write_log && !no_log).then(chrono::Local::now);
            let progress = progress_bar();
            let run = sorter::run_sort(
                &source,
                &dest,
                &halls,
                options,
                &probe,
                session.as_mut(),
                log_time,
                &progress,
            )
            .await?;
            let report = &run.report;

            println!("✔ 仕分け済み: {}件", report.sorted.len());
            println!("  食堂不明: {}件", report.hall_not_found.len());
            println!("  重複: {}件", report.duplicates.len());
            if let Some(session) = &session {
                let requested = report.sorted.iter().filter(|a| a.survey_id.is_some()).count();
                println!("  調査PDF: {}/{}件", session.fetched(), requested);
            }
            match &report.aborted {
                Some(AbortReason::ConnectionLost { remaining }) => {
                    println!("✗ 接続が切れたため中断しました（未処理 {}件）", remaining)
                }
                Some(AbortReason::SessionExpired { remaining }) => println!(
                    "✗ ログインが切れたため中断しました（未処理 {}件）。`applicant-organizer login` で再ログインしてください",
                    remaining
                ),
                None => {}
            }
            if let Some(path) = &run.log_path {
                println!("✔ View your results at {}", path.display());
            }

            println!("\n✅ Sorting process complete!");
        }

        Commands::Halls { action } => {
            let settings = SettingsStore::open_default()?;
            match action {
                HallsCommand::List => hall_editor::list_halls(&settings)?,
                HallsCommand::Add { name, key, folder } => {
                    hall_editor::add_hall(&settings, &name, &key, &folder)?
                }
                HallsCommand::Set { name, key, folder } => {
                    hall_editor::set_hall(&settings, &name, key.as_deref(), folder.as_deref())?
                }
                HallsCommand::Remove { name } => hall_editor::remove_hall(&settings, &name)?,
                HallsCommand::Edit => hall_editor::run_interactive(&settings)?,
            }
        }

        Commands::Login => {
            let session = BrowserSession::from_config(&config)?;
            session.login().await?;
            println!("✔ ログインしました");
        }

        Commands::Logout => {
            let session = BrowserSession::from_config(&config)?;
            if session.logout()? {
                println!("✔ ログイン情報を削除しました: {}", session.profile_dir().display());
            } else {
                println!("ログイン情報はありません");
            }
        }

        Commands::Config {
            set_form_url,
            set_survey_url,
            set_browser,
            create_all_folders,
            write_log,
            show,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(url) = set_form_url {
                config.form_url = url;
                changed = true;
            }
            if let Some(template) = set_survey_url {
                config.set_survey_url_template(template)?;
                changed = true;
            }
            if let Some(browser) = set_browser {
                config.browser = Some(browser);
                changed = true;
            }
            if let Some(value) = create_all_folders {
                config.create_all_folders = value;
                changed = true;
            }
            if let Some(value) = write_log {
                config.write_log = value;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  フォームURL: {}", config.form_url);
                println!(
                    "  調査URL: {}",
                    config.survey_url_template.as_deref().unwrap_or("未設定")
                );
                println!(
                    "  ブラウザ: {}",
                    config
                        .browser
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "自動検出".into())
                );
                println!("  全フォルダ作成: {}", config.create_all_folders);
                println!("  ログ出力: {}", config.write_log);
                println!("  食堂設定ファイル: {}", SettingsStore::default_path().display());
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "applicant_organizer=debug,organizer_common=debug"
    } else {
        "applicant_organizer=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn progress_bar() -> ProgressBar {
    let progress = ProgressBar::new(0);
    let style = ProgressStyle::with_template("  [{bar:30}] {pos}/{len} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    progress.set_style(style);
    progress
}
