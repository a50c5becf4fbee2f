mod config;
mod prompt;
mod render;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use platform_obs::{ObsConfig, init_tracing};
use products_hr::{
    AssumeYes, Confirm, DeleteOutcome, EmployeeField, EmployeeId, EntriesLimit, HrModule,
    NewEmployeeForm, PersistenceBridge, RecordStore, SaveOutcome, sort::parse_sort_spec,
};
use tracing::info;

use crate::{config::AppConfig, prompt::PromptConfirm};

#[derive(Parser, Debug)]
#[command(name = "hrnet", version, about = "HRnet employee register")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an employee record.
    Add(AddCommand),
    /// Show current employees.
    List(ListCommand),
    /// Edit fields of an employee.
    Edit(EditCommand),
    /// Delete an employee.
    Delete(DeleteCommand),
    /// Print the state and department lists.
    Reference,
}

#[derive(Args, Debug)]
struct AddCommand {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long, value_name = "MM/DD/YYYY")]
    date_of_birth: String,
    #[arg(long, value_name = "MM/DD/YYYY")]
    start_date: String,
    #[arg(long)]
    street: String,
    #[arg(long)]
    city: String,
    #[arg(long, value_name = "CODE")]
    state: String,
    #[arg(long)]
    zip_code: String,
    #[arg(long)]
    department: String,
}

impl From<AddCommand> for NewEmployeeForm {
    fn from(value: AddCommand) -> Self {
        NewEmployeeForm {
            first_name: value.first_name,
            last_name: value.last_name,
            date_of_birth: value.date_of_birth,
            start_date: value.start_date,
            street: value.street,
            city: value.city,
            state: value.state,
            zip_code: value.zip_code,
            department: value.department,
        }
    }
}

#[derive(Args, Debug)]
struct ListCommand {
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, value_name = "10|25|50|100|all")]
    entries: Option<EntriesLimit>,
    #[arg(long, value_name = "FIELD:asc|desc")]
    sort: Option<String>,
    #[arg(long, help = "Print rows as JSON instead of a table")]
    json: bool,
}

#[derive(Args, Debug)]
struct EditCommand {
    id: String,
    #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
    changes: Vec<String>,
    #[arg(long, short, help = "Skip the confirmation prompt")]
    yes: bool,
}

#[derive(Args, Debug)]
struct DeleteCommand {
    id: String,
    #[arg(long, short, help = "Skip the confirmation prompt")]
    yes: bool,
}

fn main() -> Result<()> {
    init_tracing(ObsConfig::default())?;
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    match cli.command {
        Command::Add(cmd) => run_add(cmd, &config),
        Command::List(cmd) => run_list(cmd, &config),
        Command::Edit(cmd) => run_edit(cmd, &config),
        Command::Delete(cmd) => run_delete(cmd, &config),
        Command::Reference => {
            print!("{}", render::reference(&config.reference_data()?));
            Ok(())
        }
    }
}

fn open_module(config: &AppConfig, skip_prompt: bool) -> Result<HrModule> {
    let slots = config.storage.open();
    info!(dir = %slots.dir().display(), "opening employee register");
    let store = RecordStore::open(PersistenceBridge::new(slots));
    let mut prompt: Box<dyn Confirm> = if skip_prompt || config.assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(PromptConfirm::stdio())
    };
    let reference = config.reference_data()?;
    let confirm = move |message: &str| prompt.confirm(message);
    Ok(HrModule::new(store, confirm).with_reference(reference))
}

fn ensure_synced(hr: &mut HrModule) -> Result<()> {
    if hr.is_synced() {
        return Ok(());
    }
    hr.flush().context("employee list could not be saved")
}

fn run_add(cmd: AddCommand, config: &AppConfig) -> Result<()> {
    let mut hr = open_module(config, true)?;
    let id = hr.add_employee(&cmd.into())?;
    ensure_synced(&mut hr)?;
    println!("Employee successfully created: {id}");
    Ok(())
}

fn run_list(cmd: ListCommand, config: &AppConfig) -> Result<()> {
    let mut hr = open_module(config, true)?;
    if let Some(limit) = cmd.entries {
        hr.set_limit(limit);
    }
    hr.set_query(cmd.search);
    if let Some(spec) = cmd.sort.as_deref() {
        let (field, direction) = parse_sort_spec(spec)?;
        hr.sort_by(field, direction);
    }
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(hr.rows())?);
    } else {
        print!("{}", render::table(hr.rows(), hr.summary(), hr.active_sort()));
    }
    Ok(())
}

fn parse_change(raw: &str) -> Result<(EmployeeField, String)> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected FIELD=VALUE, got {raw:?}"))?;
    Ok((field.parse()?, value.to_string()))
}

fn run_edit(cmd: EditCommand, config: &AppConfig) -> Result<()> {
    let changes = cmd
        .changes
        .iter()
        .map(|raw| parse_change(raw))
        .collect::<Result<Vec<_>>>()?;
    let mut hr = open_module(config, cmd.yes)?;
    let id = EmployeeId::from(cmd.id);
    if !hr.enter_edit(&id) {
        bail!("no employee with id {id}");
    }
    for (field, value) in changes {
        hr.change_field(field, value)?;
    }
    match hr.save_edit()? {
        SaveOutcome::Saved(id) => {
            ensure_synced(&mut hr)?;
            println!("Employee {id} updated");
            Ok(())
        }
        SaveOutcome::Invalid(fields) => {
            let names: Vec<&str> = fields.iter().map(|field| field.as_str()).collect();
            bail!("invalid fields: {}", names.join(", "))
        }
        SaveOutcome::Declined => {
            hr.cancel_edit();
            println!("Update cancelled");
            Ok(())
        }
        SaveOutcome::Missing(id) => bail!("no employee with id {id}"),
    }
}

fn run_delete(cmd: DeleteCommand, config: &AppConfig) -> Result<()> {
    let mut hr = open_module(config, cmd.yes)?;
    let id = EmployeeId::from(cmd.id);
    match hr.delete_employee(&id) {
        DeleteOutcome::Removed => {
            ensure_synced(&mut hr)?;
            println!("Employee {id} deleted");
        }
        DeleteOutcome::Missing => println!("No employee with id {id}"),
        DeleteOutcome::Declined => println!("Delete cancelled"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_storage::StorageSettings;

    fn config_in(dir: &std::path::Path) -> AppConfig {
        AppConfig {
            storage: StorageSettings::new(dir),
            reference_file: None,
            assume_yes: false,
        }
    }

    fn parse_add(args: &[&str]) -> AddCommand {
        let cli = Cli::try_parse_from(["hrnet", "add"].into_iter().chain(args.iter().copied()))
            .unwrap();
        let Command::Add(add) = cli.command else {
            panic!("expected add command");
        };
        add
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_list_arguments() {
        let cli = Cli::try_parse_from([
            "hrnet", "list", "--search", "jo", "--entries", "all", "--sort", "startDate:desc",
        ])
        .unwrap();
        let Command::List(list) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(list.entries, Some(EntriesLimit::All));
        assert_eq!(list.sort.as_deref(), Some("startDate:desc"));
    }

    #[test]
    fn rejects_bad_entries_value() {
        assert!(Cli::try_parse_from(["hrnet", "list", "--entries", "0"]).is_err());
    }

    #[test]
    fn parses_field_assignments() {
        let (field, value) = parse_change("zip-code=10001").unwrap();
        assert_eq!(field, EmployeeField::ZipCode);
        assert_eq!(value, "10001");
        let (_, value) = parse_change("street=1 A=B Lane").unwrap();
        assert_eq!(value, "1 A=B Lane");
        assert!(parse_change("zipCode").is_err());
        assert!(parse_change("salary=1").is_err());
    }

    #[test]
    fn add_and_delete_persist_in_the_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let add = parse_add(&[
            "--first-name", "Ada", "--last-name", "Byron", "--date-of-birth", "12/10/1985",
            "--start-date", "03/01/2020", "--street", "1 Main St", "--city", "Boston",
            "--state", "MA", "--zip-code", "02110", "--department", "Engineering",
        ]);
        run_add(add, &config).unwrap();
        assert!(dir.path().join("employeeList.json").exists());

        let hr = open_module(&config, true).unwrap();
        assert_eq!(hr.store().len(), 1);
        let added = &hr.store().records()[0];
        assert_eq!(added.get(EmployeeField::DateOfBirth), "1985-12-10");

        let id = added.id.to_string();
        run_delete(DeleteCommand { id, yes: true }, &config).unwrap();
        assert!(open_module(&config, true).unwrap().store().is_empty());
    }

    #[test]
    fn rejected_form_leaves_the_data_dir_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let add = parse_add(&[
            "--first-name", "Ada", "--last-name", "Byron", "--date-of-birth", "12/10/1985",
            "--start-date", "03/01/2020", "--street", "1 Main St", "--city", "Boston",
            "--state", "ZZ", "--zip-code", "02110", "--department", "Engineering",
        ]);
        assert!(run_add(add, &config).is_err());
        assert!(!dir.path().join("employeeList.json").exists());
    }

    #[test]
    fn editing_an_unknown_id_fails() {
        let dir = tempfile::tempdir().unwrap();
        let edit = EditCommand {
            id: "nope".into(),
            changes: vec!["city=Denver".into()],
            yes: true,
        };
        assert!(run_edit(edit, &config_in(dir.path())).is_err());
    }
}
