//! IAM Policy Console - 策略编写控制台入口
//!
//! 列表、查看、编写、校验、试运行、发布和删除策略，后端为策略服务 HTTP API。

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use cuba_errors::AppError;
use cuba_ports::{Notification, Notifier};
use cuba_telemetry::HealthStatus;
use secrecy::Secret;
use tracing::{debug, info, warn};

use iam_policy_console::application::{PolicyConsole, session};
use iam_policy_console::config::ConsoleConfig;
use iam_policy_console::domain::policy::{
    DEFAULT_POLICY_TEMPLATE, Policy, PolicyId, PolicyStatus, TestResult,
};
use iam_policy_console::error::ConsoleError;
use iam_policy_console::infrastructure::files::{export_policy, import_policy};
use iam_policy_console::infrastructure::terminal::{
    TerminalConfirmer, TerminalNotifier, render, token_listing,
};
use iam_policy_console::infrastructure::{FileSessionStore, PolicyApiClient};

#[derive(Debug, Parser)]
#[command(name = "policy-console", version, about = "IAM policy authoring console")]
struct Cli {
    /// 配置目录
    #[arg(long, env = "POLICY_CONSOLE_CONFIG_DIR", default_value = "config")]
    config_dir: String,

    /// 覆盖配置中的策略服务地址
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// 禁用彩色输出
    #[arg(long, global = true)]
    no_color: bool,

    /// 命令结束时输出请求指标快照
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 列出所有策略
    List,
    /// 查看单个策略
    Show { id: String },
    /// 语法高亮显示策略文件
    Highlight {
        file: PathBuf,
        /// 输出 token 列表而非着色文本
        #[arg(long)]
        tokens: bool,
    },
    /// 本地结构校验
    Check {
        file: PathBuf,
        /// 同时调用策略服务校验
        #[arg(long)]
        remote: bool,
    },
    /// 从文件创建或更新策略
    Save {
        file: PathBuf,
        #[arg(long)]
        name: Option<String>,
        /// 已有策略 ID，提供时执行更新
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<PolicyStatus>,
    },
    /// 试运行策略文件
    Test { file: PathBuf },
    /// 删除策略
    Delete {
        id: String,
        /// 跳过确认
        #[arg(long, short)]
        yes: bool,
    },
    /// 发布策略
    Publish { id: String },
    /// 导出策略内容到 `{name}.cedar`
    Export {
        id: String,
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// 打印默认策略模板
    Template,
    /// 策略服务健康检查
    Health,
    /// 保存会话令牌
    Login {
        #[arg(long, env = "POLICY_CONSOLE_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// 清除会话令牌
    Logout,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match ConsoleConfig::load(&cli.config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(base_url) = &cli.base_url {
        config.policy_api.base_url = base_url.clone();
    }

    cuba_telemetry::init(&config.telemetry.log_level, config.telemetry.json);
    debug!(app_env = %config.app_env, base_url = %config.policy_api.base_url, "Configuration loaded");

    let metrics = if cli.metrics || config.telemetry.metrics {
        match cuba_telemetry::init_metrics() {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "Failed to install metrics recorder");
                None
            }
        }
    } else {
        None
    };

    let code = match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => exit_with(err),
    };

    if let Some(handle) = metrics {
        eprint!("{}", handle.render());
    }
    code
}

/// 后端错误和缺失字段已经以通知形式输出，这里只补充其余错误
fn exit_with(err: anyhow::Error) -> ExitCode {
    match err.downcast::<ConsoleError>() {
        Ok(console_err) => {
            let notified = console_err.is_backend()
                || matches!(console_err, ConsoleError::MissingField(_));
            let app_err = AppError::from(console_err);
            if !notified {
                eprintln!("error: {}", app_err);
            }
            debug!(problem = ?app_err.to_problem_details(), "Command failed");

            match app_err.status_code() {
                400..=499 => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
        Err(other) => {
            eprintln!("error: {:#}", other);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: ConsoleConfig) -> anyhow::Result<()> {
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    let color = console::colors_enabled();
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier::stderr());
    let store = FileSessionStore::new(&config.session.token_file);

    match &cli.command {
        Command::Highlight { file, tokens } => {
            let content = import_policy(file).await?;
            if *tokens {
                for line in token_listing(&content) {
                    println!("{}", line);
                }
            } else {
                print_source(&content, color);
            }
            return Ok(());
        }
        Command::Template => {
            print_source(DEFAULT_POLICY_TEMPLATE, color);
            return Ok(());
        }
        Command::Login { token } => {
            session::login(&store, Secret::new(token.clone())).await?;
            info!(path = %store.path().display(), "Session token stored");
            notifier.notify(Notification::success("Logged in"));
            return Ok(());
        }
        Command::Logout => {
            session::logout(&store).await?;
            notifier.notify(Notification::success("Logged out"));
            return Ok(());
        }
        _ => {}
    }

    let mode = config.editor.validation_mode;
    let assume_yes = matches!(cli.command, Command::Delete { yes: true, .. });

    let token = session::session_token(&config.session, &store).await?;
    let mut client = PolicyApiClient::new(&config.policy_api)?;
    if let Some(token) = token {
        client.set_token(token);
    }
    debug!(
        base_url = client.base_url(),
        authenticated = client.session().is_authenticated(),
        "Policy API client ready"
    );

    let mut console = PolicyConsole::new(
        Arc::new(client),
        Arc::clone(&notifier),
        Arc::new(TerminalConfirmer::new(assume_yes)),
        mode,
    );

    match cli.command {
        Command::List => {
            console.refresh().await?;
            print_policies(console.list().policies());
        }
        Command::Show { id } => {
            let editor = console.open(&PolicyId::new(id)).await?;
            let draft = editor.draft();
            println!("Name:        {}", draft.name);
            println!("Status:      {}", draft.status);
            println!("Version:     {}", draft.display_version());
            if !draft.description.is_empty() {
                println!("Description: {}", draft.description);
            }
            println!(
                "Lines:       {} ({})",
                editor.line_count(),
                if editor.is_valid() { "valid" } else { "invalid" }
            );
            println!();
            print_source(&draft.content, color);
        }
        Command::Check { file, remote } => {
            let content = import_policy(&file).await?;
            let valid = mode.validate(&content);
            for line in mode.offending_lines(&content) {
                eprintln!(
                    "{}:{}: policy declaration must open its block on the same line",
                    file.display(),
                    line
                );
            }
            println!("{}: {} ({})", file.display(), if valid { "valid" } else { "invalid" }, mode);

            if remote {
                let report = console.validate_remote(&content).await?;
                if !report.valid {
                    return Err(ConsoleError::Api {
                        status: 422,
                        detail: Some(report.errors.join("; ")),
                    }
                    .into());
                }
            }
            if !valid {
                return Err(ConsoleError::Validation.into());
            }
        }
        Command::Save {
            file,
            name,
            id,
            description,
            status,
        } => {
            let content = import_policy(&file).await?;
            let editor = match id {
                Some(id) => console.open(&PolicyId::new(id)).await?,
                None => console.new_policy(),
            };
            editor.set_content(content);
            if let Some(name) = name {
                editor.set_name(name);
            }
            if let Some(description) = description {
                editor.set_description(description);
            }
            if let Some(status) = status {
                editor.set_status(status);
            }
            for line in mode.offending_lines(&editor.draft().content) {
                eprintln!(
                    "{}:{}: policy declaration must open its block on the same line",
                    file.display(),
                    line
                );
            }

            let policy = console.save().await?;
            if let Some(id) = &policy.id {
                println!("{}", id);
            }
        }
        Command::Test { file } => {
            let content = import_policy(&file).await?;
            console.new_policy().set_content(content);
            let result = console.test().await?;
            print_test_result(&result);
        }
        Command::Delete { id, .. } => {
            if !console.delete(&PolicyId::new(id)).await? {
                println!("Cancelled");
            }
        }
        Command::Publish { id } => {
            let policy = console.publish(&PolicyId::new(id)).await?;
            println!("{} {}", policy.name, policy.status);
        }
        Command::Export { id, dir } => {
            let editor = console.open(&PolicyId::new(id)).await?;
            let draft = editor.draft().clone();
            let dir = dir.unwrap_or(config.editor.export_dir);
            let path = export_policy(&dir, &draft).await?;
            println!("{}", path.display());
        }
        Command::Health => {
            let health = console.health().await?;
            let mut status = HealthStatus::new();
            status.add_check("policy-api", health.is_healthy(), Some(health.status.clone()));
            for (name, state) in &health.services {
                status.add_check(name.clone(), state.eq_ignore_ascii_case("healthy"), Some(state.clone()));
            }

            for check in &status.checks {
                println!(
                    "{:<20} {}",
                    check.name,
                    check.message.as_deref().unwrap_or("-")
                );
            }
            if !status.healthy {
                return Err(ConsoleError::Api {
                    status: 503,
                    detail: Some(format!("Unhealthy: {}", status.failing().join(", "))),
                }
                .into());
            }
        }
        Command::Highlight { .. } | Command::Template | Command::Login { .. } | Command::Logout => {}
    }

    Ok(())
}

fn print_source(content: &str, color: bool) {
    println!("{}", render(content, color));
}

fn print_policies(policies: &[Policy]) {
    if policies.is_empty() {
        println!("No policies found");
        return;
    }

    println!(
        "{:<12} {:<32} {:<10} {:<8} {}",
        "ID", "NAME", "STATUS", "VERSION", "UPDATED"
    );
    for policy in policies {
        let id = policy.id.as_ref().map(PolicyId::as_str).unwrap_or("-");
        let updated = policy
            .updated_at
            .or(policy.created_at)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<12} {:<32} {:<10} {:<8} {}",
            id,
            policy.name,
            policy.status,
            policy.display_version(),
            updated
        );
    }
}

fn print_test_result(result: &TestResult) {
    let summary = result.effective_summary();
    println!(
        "Total: {}  Allowed: {}  Denied: {}",
        summary.total, summary.allowed, summary.denied
    );
    for outcome in &result.results {
        let decision = if outcome.allowed { "ALLOW" } else { "DENY " };
        match &outcome.reason {
            Some(reason) => println!(
                "{} {} {} {} ({})",
                decision, outcome.principal, outcome.action, outcome.resource, reason
            ),
            None => println!(
                "{} {} {} {}",
                decision, outcome.principal, outcome.action, outcome.resource
            ),
        }
    }
}
