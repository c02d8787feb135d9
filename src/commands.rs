//! Command handlers: run a use case, print the result for the operator.
//!
//! Operator messages go to stdout; logs go to stderr and the log file.

use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use vh_app::usecases::collation::target_rows;
use vh_app::usecases::{
    BundleScanError, BundleSelectSession, CollateError, CollationSession, ContainerPhotos,
    RegisterContainerError,
};
use vh_app::App;
use vh_core::container::calc_check_digit;
use vh_core::ports::ScannerPort;
use vh_core::progress::{format_count, format_remaining};
use vh_core::scan::ScanDispatcher;
use vh_core::settings::TerminalSettings;
use vh_core::shipment::ContainerSize;
use vh_core::time::format_db;
use vh_core::vanning::{format_weight, ContainerRegistration, LoadLimits, SelectionMode};
use vh_terminal::StdinScanner;

use crate::WeightArgs;

const COLLATION_CONFIRMED: &str = "積載束照合を確定しました";

impl WeightArgs {
    fn apply(self, mut limits: LoadLimits) -> LoadLimits {
        if let Some(kg) = self.container_kg {
            limits.container_kg = kg;
        }
        if let Some(kg) = self.dunnage_kg {
            limits.dunnage_kg = kg;
        }
        if let Some(kg) = self.max_kg {
            limits.max_kg = kg;
        }
        limits
    }
}

/// A line typed instead of scanned: `:rm N`, `:clear`, `:done`.
#[derive(Debug, PartialEq, Eq)]
enum ScanInput<'a> {
    Tag(&'a str),
    Remove(usize),
    Clear,
    Done,
}

impl<'a> ScanInput<'a> {
    fn parse(line: &'a str) -> Self {
        match line.split_whitespace().collect::<Vec<_>>().as_slice() {
            [":rm", n] => n.parse().map(ScanInput::Remove).unwrap_or(ScanInput::Tag(line)),
            [":clear"] => ScanInput::Clear,
            [":done"] => ScanInput::Done,
            _ => ScanInput::Tag(line),
        }
    }
}

fn stdin_scanner() -> StdinScanner<BufReader<io::Stdin>> {
    StdinScanner::new(BufReader::new(io::stdin()))
}

fn report_sync(ok: bool) -> Result<()> {
    if ok {
        println!("OK");
        Ok(())
    } else {
        bail!("同期処理でエラーが発生しました")
    }
}

pub async fn sync(app: &App) -> Result<()> {
    let ok = app.data_sync().run_sync(|msg| println!("{msg}")).await;
    report_sync(ok)
}

pub async fn send_shipments(app: &App) -> Result<()> {
    let ok = app.data_sync().send_syukka_only(|msg| println!("{msg}")).await;
    report_sync(ok)
}

pub async fn send_collations(app: &App) -> Result<()> {
    let ok = app.data_sync().send_syougo_only(|msg| println!("{msg}")).await;
    report_sync(ok)
}

fn print_selection(session: &BundleSelectSession) {
    let selection = session.selection();
    for (i, row) in selection.display_rows().iter().enumerate() {
        println!(
            "{:>2} {} {} {} {}",
            i + 1,
            row.packing_no,
            row.bundle_no,
            row.sokuban,
            row.jyuryo
        );
    }
    println!(
        "{} bundles, {} kg, remaining {} kg",
        selection.len(),
        format_weight(selection.jyuryo_sum()).trim(),
        format_weight(session.remaining_kg()).trim()
    );
}

pub async fn scan(app: &App, mode: SelectionMode, size: ContainerSize, weights: WeightArgs) -> Result<()> {
    let limits = weights.apply(app.load_limits(size).await?);
    let mut session = app.open_bundle_select(mode, limits).await?;
    print_selection(&session);

    let mut scanner = stdin_scanner();
    let mut dispatcher = ScanDispatcher::new();
    scanner.press_trigger(true)?;

    while let Some(raw) = scanner.next_read()? {
        let Some(event) = dispatcher.accept_raw(&raw) else {
            continue;
        };
        match ScanInput::parse(&event.data) {
            ScanInput::Tag(tag) => match session.scan(tag).await {
                Ok(bundle) => println!("OK {} {}", bundle.heat_no, bundle.sokuban),
                Err(BundleScanError::Store(err)) => return Err(err),
                Err(err) => println!("NG {err}"),
            },
            ScanInput::Remove(no) => {
                let removed = match no.checked_sub(1) {
                    Some(index) => session.remove_bundle(index).await?,
                    None => None,
                };
                if removed.is_none() {
                    println!("NG {no}");
                }
                dispatcher.reset();
            }
            ScanInput::Clear => {
                session.delete_bundles().await?;
                dispatcher.reset();
            }
            ScanInput::Done => break,
        }
        print_selection(&session);
    }

    scanner.press_trigger(false)
}

/// Registration screen input as given on the command line.
pub struct RegistrationForm {
    pub owner: String,
    pub serial: String,
    pub seal: String,
    pub booking: Option<String>,
    pub size: ContainerSize,
    pub weights: WeightArgs,
    pub container_photo: Option<PathBuf>,
    pub seal_photo: Option<PathBuf>,
}

async fn read_photo(path: Option<&Path>) -> Result<Option<Vec<u8>>> {
    match path {
        Some(path) => tokio::fs::read(path)
            .await
            .map(Some)
            .with_context(|| format!("Failed to read photo: {}", path.display())),
        None => Ok(None),
    }
}

pub async fn register_container(app: &App, form: RegistrationForm) -> Result<()> {
    let limits = form.weights.apply(app.load_limits(form.size).await?);
    let input = ContainerRegistration {
        owner_code: form.owner,
        serial_no: form.serial,
        seal_no: form.seal,
        booking_no: form.booking,
        container_size: form.size,
        container_kg: limits.container_kg,
        dunnage_kg: limits.dunnage_kg,
        max_kg: limits.max_kg,
    };
    let photos = ContainerPhotos {
        container: read_photo(form.container_photo.as_deref()).await?,
        seal: read_photo(form.seal_photo.as_deref()).await?,
    };

    match app.register_container().execute(&input, photos).await {
        Ok(outcome) => {
            println!("container {} registered", outcome.container_id);
            if let Some(message) = outcome.send_error {
                println!("{message}");
            }
            Ok(())
        }
        Err(RegisterContainerError::Rule(err)) => bail!("{err}"),
        Err(RegisterContainerError::Store(err)) => Err(err),
    }
}

fn print_collation(session: &CollationSession) {
    for line in session.lines() {
        println!(
            "{} {} {} {} {}",
            if line.syougo_kakunin { "済" } else { "  " },
            line.syukka_sashizu_no.as_deref().unwrap_or_default(),
            line.bundle_no.as_deref().unwrap_or_default(),
            line.heat_no,
            line.sokuban
        );
    }
    let progress = session.progress();
    println!("collated {} / uncollated {}", progress.collated, progress.uncollated);
}

pub async fn collate(app: &App, selected_no: Option<usize>) -> Result<()> {
    let Some(selected_no) = selected_no else {
        let targets = app.collation_targets().await?;
        for row in target_rows(&targets) {
            println!(
                "{:>2} {} {} {} {}",
                row.no, row.container_id, row.container_no, row.bundle_cnt, row.sagyou
            );
        }
        return Ok(());
    };

    let mut session = match app.open_collation(selected_no).await {
        Ok(session) => session,
        Err(CollateError::Store(err)) => return Err(err),
        Err(err) => bail!("{err}"),
    };
    if session.lines().is_empty() {
        println!("{}", CollateError::NoLines);
    }
    print_collation(&session);

    let mut scanner = stdin_scanner();
    let mut dispatcher = ScanDispatcher::new();
    scanner.press_trigger(true)?;

    while let Some(raw) = scanner.next_read()? {
        let Some(event) = dispatcher.accept_raw(&raw) else {
            continue;
        };
        match ScanInput::parse(&event.data) {
            ScanInput::Done => break,
            ScanInput::Tag(tag) => match session.scan(tag).await {
                Ok(line) => println!("OK {} {}", line.heat_no, line.sokuban),
                Err(CollateError::Store(err)) => return Err(err),
                Err(err) => println!("NG {err}"),
            },
            ScanInput::Remove(_) | ScanInput::Clear => continue,
        }
        print_collation(&session);
    }
    scanner.press_trigger(false)?;

    match session.mark_container_collated(|msg| println!("{msg}")).await {
        Ok(_) => {
            println!("{COLLATION_CONFIRMED}");
            Ok(())
        }
        Err(CollateError::Store(err)) => Err(err),
        Err(err) => bail!("{err}"),
    }
}

pub async fn progress(app: &App) -> Result<()> {
    let p = app.get_progress().execute().await?;

    println!("{:<10}{:>10}{:>10}{:>10}", "", "予定", "完了", "残");
    println!(
        "{:<10}{:>10}{:>10}{:>10}",
        "コンテナ",
        format_count(p.plan_containers),
        format_count(p.done_containers),
        format_remaining(p.remaining_containers())
    );
    println!(
        "{:<10}{:>10}{:>10}{:>10}",
        "束",
        format_count(p.plan_bundles),
        format_count(p.done_bundles),
        format_remaining(p.remaining_bundles())
    );
    println!(
        "{:<10}{:>10}{:>10}{:>10}",
        "重量(t)",
        format_count(p.plan_tons),
        format_count(p.done_tons),
        format_remaining(p.remaining_tons())
    );
    println!("受信日時 {}", p.last_received_text());
    if p.has_unsent {
        println!("未送信データがあります");
    }
    if p.has_work {
        println!("作業中の束選択があります");
    }
    Ok(())
}

pub async fn history(app: &App, limit: i64) -> Result<()> {
    for row in app.list_comm_history().execute(limit).await? {
        println!(
            "{} {} {} {} {}",
            row.log_id,
            format_db(row.start_ymdhms),
            row.proc_name,
            row.err_number,
            row.err_description.as_deref().unwrap_or(&row.return_value)
        );
    }
    Ok(())
}

pub async fn server_time(app: &App) -> Result<()> {
    match app.get_server_time().execute().await? {
        Some(time) => println!("{}", format_db(time)),
        None => println!("(none)"),
    }
    Ok(())
}

pub fn check_digit(value: &str) -> Result<()> {
    match calc_check_digit(value) {
        Some(digit) => {
            println!("{digit}");
            Ok(())
        }
        None => bail!("コンテナNoの入力が正しくありません"),
    }
}

pub async fn settings(app: &App, import: Option<&Path>) -> Result<()> {
    if let Some(path) = import {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        let settings: TerminalSettings =
            serde_json::from_str(&content).context("Failed to parse settings")?;
        app.update_settings().execute(settings).await?;
    }

    let settings = app.get_settings().execute().await?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_commands_are_recognised() {
        assert_eq!(ScanInput::parse(":rm 3"), ScanInput::Remove(3));
        assert_eq!(ScanInput::parse(":clear"), ScanInput::Clear);
        assert_eq!(ScanInput::parse(":done"), ScanInput::Done);
        assert_eq!(ScanInput::parse(":rm x"), ScanInput::Tag(":rm x"));
        assert_eq!(ScanInput::parse("AH00001000101"), ScanInput::Tag("AH00001000101"));
    }

    #[test]
    fn weight_overrides_replace_defaults() {
        let defaults = LoadLimits {
            container_kg: 2_200,
            dunnage_kg: 100,
            max_kg: 24_000,
        };
        let weights = WeightArgs {
            dunnage_kg: Some(150),
            ..WeightArgs::default()
        };

        let limits = weights.apply(defaults);

        assert_eq!(limits.container_kg, 2_200);
        assert_eq!(limits.dunnage_kg, 150);
        assert_eq!(limits.max_kg, 24_000);
    }
}
