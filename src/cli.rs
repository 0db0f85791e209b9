use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "applicant-organizer")]
#[command(about = "応募書類PDFの食堂別仕分け・スケジュール調査PDF取得ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 入力フォルダのPDFを食堂・応募者ごとに仕分け
    Sort {
        /// 入力フォルダ（応募書類PDF）
        #[arg(required = true)]
        source: PathBuf,

        /// 出力フォルダ
        #[arg(required = true)]
        dest: PathBuf,

        /// 応募者がいない食堂のフォルダも作成
        #[arg(long)]
        all_folders: bool,

        /// ログ（Excel）を出力しない
        #[arg(long)]
        no_log: bool,

        /// 調査PDFを取得せず、ファイルの仕分けだけ行う
        #[arg(long)]
        offline: bool,
    },

    /// 食堂設定を表示/編集
    Halls {
        #[command(subcommand)]
        action: HallsCommand,
    },

    /// フォームにログイン（ログイン情報を作り直す）
    Login,

    /// 保存済みのログイン情報を削除
    Logout,

    /// 設定を表示/編集
    Config {
        /// ログイン先フォームのURL
        #[arg(long)]
        set_form_url: Option<String>,

        /// 調査ページのURL（{id} を調査番号に置換）
        #[arg(long)]
        set_survey_url: Option<String>,

        /// ブラウザ実行ファイルのパス
        #[arg(long)]
        set_browser: Option<PathBuf>,

        /// 全食堂のフォルダを常に作成
        #[arg(long)]
        create_all_folders: Option<bool>,

        /// ログ（Excel）を出力
        #[arg(long)]
        write_log: Option<bool>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum HallsCommand {
    /// 登録済みの食堂を一覧表示
    List,

    /// 食堂を追加
    Add {
        /// 食堂名
        name: String,
        /// ファイル名末尾のキーフレーズ
        key: String,
        /// 出力フォルダ名
        folder: String,
    },

    /// キーフレーズ/フォルダ名を変更
    Set {
        /// 食堂名
        name: String,

        #[arg(short, long)]
        key: Option<String>,

        #[arg(short, long)]
        folder: Option<String>,
    },

    /// 食堂を削除
    Remove {
        /// 食堂名
        name: String,
    },

    /// 対話式で編集
    Edit,
}
