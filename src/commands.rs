use std::io::Write;

use anyhow::{anyhow, Result};
use chrono::Local;

use weekgrid_core::datekey::{month_summary, WeekWindow};
use weekgrid_core::model::{
    hour_label, parse_hour_label, ActionError, CellView, WeekView, END_HOUR, START_HOUR,
};
use weekgrid_core::services::WeekService;
use weekgrid_core::session::Session;
use weekgrid_core::AppConfig;

use crate::cli::{CellArgs, ClearArgs, CliCommand, SetArgs, ShowArgs};

const CELL_WIDTH: usize = 14;

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::Show(args) => handle_show(config, &args, &mut writer),
        CliCommand::Set(args) => handle_set(config, &args, &mut writer),
        CliCommand::Repeat(args) => handle_repeat(config, &args, &mut writer),
        CliCommand::DeleteRepeats(args) => handle_delete_repeats(config, &args, &mut writer),
        CliCommand::Clear(args) => handle_clear(config, &args, &mut writer),
    }
}

fn handle_show<W: Write>(config: &AppConfig, args: &ShowArgs, mut writer: W) -> Result<()> {
    let today = Local::now().date_naive();
    let week = WeekWindow::containing(args.week.unwrap_or(today));
    let service = WeekService::new(config.clone())?;
    let view = service.view_for(week)?;

    writeln!(writer, "{}", month_summary(today))?;
    writeln!(writer, "Week of {}", week.start())?;
    writeln!(writer)?;
    write_grid(&mut writer, &view)
}

fn handle_set<W: Write>(config: &AppConfig, args: &SetArgs, mut writer: W) -> Result<()> {
    let hour = resolve_hour_label(&args.hour)?;
    let text = args.text.join(" ");
    let service = WeekService::new(config.clone())?;
    service.apply_edit(args.date, &hour, &text)?;
    writeln!(writer, "Saved {} {}", args.date, hour)?;
    Ok(())
}

fn handle_repeat<W: Write>(config: &AppConfig, args: &CellArgs, mut writer: W) -> Result<()> {
    let hour = resolve_hour_label(&args.hour)?;
    let service = WeekService::new(config.clone())?;

    let mut session = Session::starting(args.date);
    session.select(args.date, hour);

    if let Some(outcome) = surface_notice(service.repeat_selected(&session), &mut writer)? {
        writeln!(
            writer,
            "Repeated '{}' at {} across the week of {}",
            outcome.text,
            outcome.hour_label,
            session.week().start()
        )?;
    }
    Ok(())
}

fn handle_delete_repeats<W: Write>(
    config: &AppConfig,
    args: &CellArgs,
    mut writer: W,
) -> Result<()> {
    let hour = resolve_hour_label(&args.hour)?;
    let service = WeekService::new(config.clone())?;

    let mut session = Session::starting(args.date);
    session.select(args.date, hour);

    if let Some(outcome) = surface_notice(service.remove_repeated_selected(&session), &mut writer)?
    {
        if outcome.removed == 0 {
            writeln!(writer, "No repeated entries at {}", outcome.hour_label)?;
        } else {
            writeln!(
                writer,
                "Removed {} repeated entr{} at {}",
                outcome.removed,
                if outcome.removed == 1 { "y" } else { "ies" },
                outcome.hour_label
            )?;
        }
    }
    Ok(())
}

fn handle_clear<W: Write>(config: &AppConfig, args: &ClearArgs, mut writer: W) -> Result<()> {
    let today = Local::now().date_naive();
    let week = WeekWindow::containing(args.week.unwrap_or(today));

    if !args.yes && !confirm_clear(&mut writer, week)? {
        writeln!(writer, "Aborted; nothing was cleared")?;
        return Ok(());
    }

    let service = WeekService::new(config.clone())?;
    service.clear_week(week)?;
    writeln!(writer, "Cleared the week of {}", week.start())?;
    Ok(())
}

/// Precondition failures are notices for the user, not process errors.
fn surface_notice<W: Write, T>(result: Result<T>, mut writer: W) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) => match err.downcast_ref::<ActionError>() {
            Some(notice) => {
                writeln!(writer, "{}", notice)?;
                Ok(None)
            }
            None => Err(err),
        },
    }
}

fn confirm_clear<W: Write>(mut writer: W, week: WeekWindow) -> Result<bool> {
    write!(
        writer,
        "Clear all tasks for the week of {}? [y/N] ",
        week.start()
    )?;
    writer.flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn resolve_hour_label(raw: &str) -> Result<String> {
    parse_hour_label(raw).map(hour_label).ok_or_else(|| {
        anyhow!(
            "Unknown hour slot '{}': expected an hour between {}:00 and {}:00",
            raw,
            START_HOUR,
            END_HOUR
        )
    })
}

fn write_grid<W: Write>(mut writer: W, view: &WeekView) -> Result<()> {
    write!(writer, "{:<8}", "Time")?;
    for date in &view.dates {
        write!(
            writer,
            "{:<width$}",
            date.format("%a %d").to_string(),
            width = CELL_WIDTH
        )?;
    }
    writeln!(writer)?;

    for row in &view.rows {
        write!(writer, "{:<8}", row.hour_label)?;
        for cell in &row.cells {
            write!(writer, "{:<width$}", cell_text(cell), width = CELL_WIDTH)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

fn cell_text(cell: &CellView) -> String {
    // Repeated cells get a trailing marker, the grid's stand-in for the
    // highlighted cell class.
    let mut text: String = cell.text.chars().take(CELL_WIDTH - 2).collect();
    if cell.repeated {
        text.push('*');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{CellArgs, ClearArgs, SetArgs, ShowArgs};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let data_dir = dir.path().to_path_buf();
        std::fs::create_dir_all(&data_dir).expect("create data dir");
        let config = AppConfig::from_data_dir(data_dir).expect("config");
        (config, dir)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn run(config: &AppConfig, command: CliCommand) -> String {
        let mut output = Vec::new();
        execute(config, command, &mut output).expect("execute");
        String::from_utf8(output).expect("utf8")
    }

    #[test]
    fn set_then_show_round_trips_through_storage() {
        let (config, _dir) = temp_config();
        let monday = date(2025, 6, 16);

        let output = run(
            &config,
            CliCommand::Set(SetArgs {
                date: monday,
                hour: "9:00".into(),
                text: vec!["Gym".into()],
            }),
        );
        assert!(output.contains("Saved 2025-06-16 9:00"));

        let output = run(
            &config,
            CliCommand::Show(ShowArgs {
                week: Some(monday),
            }),
        );
        assert!(output.contains("Week of 2025-06-15"));
        assert!(output.contains("Gym"));
        assert!(output.contains("(Left-"));
    }

    #[test]
    fn set_rejects_hours_outside_the_grid() {
        let (config, _dir) = temp_config();
        let args = SetArgs {
            date: date(2025, 6, 16),
            hour: "23:00".into(),
            text: vec!["Sleep".into()],
        };
        let mut output = Vec::new();
        let err = execute(&config, CliCommand::Set(args), &mut output)
            .expect_err("out-of-range hour");
        assert!(err.to_string().contains("Unknown hour slot '23:00'"));
    }

    #[test]
    fn repeat_then_delete_repeats_round_trip() {
        let (config, _dir) = temp_config();
        let monday = date(2025, 6, 16);

        run(
            &config,
            CliCommand::Set(SetArgs {
                date: monday,
                hour: "9:00".into(),
                text: vec!["Standup".into()],
            }),
        );

        let output = run(
            &config,
            CliCommand::Repeat(CellArgs {
                date: monday,
                hour: "9:00".into(),
            }),
        );
        assert!(output.contains("Repeated 'Standup' at 9:00 across the week of 2025-06-15"));

        let output = run(
            &config,
            CliCommand::Show(ShowArgs {
                week: Some(monday),
            }),
        );
        assert_eq!(output.matches("Standup*").count(), 7);

        let output = run(
            &config,
            CliCommand::DeleteRepeats(CellArgs {
                date: monday,
                hour: "9:00".into(),
            }),
        );
        assert!(output.contains("Removed 7 repeated entries at 9:00"));

        let output = run(
            &config,
            CliCommand::Show(ShowArgs {
                week: Some(monday),
            }),
        );
        assert!(!output.contains("Standup"));
    }

    #[test]
    fn repeating_an_empty_cell_prints_a_notice() {
        let (config, _dir) = temp_config();
        let output = run(
            &config,
            CliCommand::Repeat(CellArgs {
                date: date(2025, 6, 16),
                hour: "9:00".into(),
            }),
        );
        assert!(output.contains("Selected cell is empty."));
    }

    #[test]
    fn delete_repeats_reports_when_nothing_matched() {
        let (config, _dir) = temp_config();
        let monday = date(2025, 6, 16);

        run(
            &config,
            CliCommand::Set(SetArgs {
                date: monday,
                hour: "9:00".into(),
                text: vec!["Manual".into()],
            }),
        );

        let output = run(
            &config,
            CliCommand::DeleteRepeats(CellArgs {
                date: monday,
                hour: "9:00".into(),
            }),
        );
        assert!(output.contains("No repeated entries at 9:00"));
    }

    #[test]
    fn clear_with_yes_removes_the_week() {
        let (config, _dir) = temp_config();
        let monday = date(2025, 6, 16);

        run(
            &config,
            CliCommand::Set(SetArgs {
                date: monday,
                hour: "9:00".into(),
                text: vec!["Gym".into()],
            }),
        );

        let output = run(
            &config,
            CliCommand::Clear(ClearArgs {
                week: Some(monday),
                yes: true,
            }),
        );
        assert!(output.contains("Cleared the week of 2025-06-15"));

        let output = run(
            &config,
            CliCommand::Show(ShowArgs {
                week: Some(monday),
            }),
        );
        assert!(!output.contains("Gym"));
    }
}
