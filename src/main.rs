use anyhow::Context;
use chrono::Local;
use clap::Parser;
use student_roster::config::Command;
use student_roster::utils::{logger, validation::Validate};
use student_roster::{
    sorted_view, CliConfig, LocalStorage, RosterConfig, RosterError, RosterSession, StudentDraft,
    StudentRecord,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match RosterConfig::from_file_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file is valid TOML or remove it to use defaults");
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(&config.logging.level, cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(cli, config) {
        tracing::error!("{:#}", e);
        match e.downcast_ref::<RosterError>() {
            Some(roster_error) => eprintln!("❌ {}", roster_error.user_friendly_message()),
            None => eprintln!("❌ {:#}", e),
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: CliConfig, config: RosterConfig) -> anyhow::Result<()> {
    let storage = LocalStorage::new(&config.storage.base_path);
    let data_file = cli.data.unwrap_or_else(|| config.storage.data_file.clone());

    let mut session = RosterSession::new(storage.clone(), config.validation_policy());
    if storage.exists(&data_file) {
        session
            .load(&data_file)
            .with_context(|| format!("loading {}", data_file))?;
    } else {
        tracing::info!("📁 {} does not exist yet, starting with an empty roster", data_file);
    }

    let today = Local::now().date_naive();

    match cli.command {
        Command::Add(args) => {
            let draft = args.into_draft(today)?;
            let index = session.add(&draft)?;
            session.save(&data_file)?;
            println!("✅ Added student #{}", index);
        }
        Command::Edit { index, fields } => {
            let current = session
                .record(index)
                .map(StudentDraft::from)
                .ok_or(RosterError::IndexOutOfRange {
                    index,
                    len: session.records().len(),
                })?;
            let draft = fields.apply_to(current)?;
            session.edit(index, &draft)?;
            session.save(&data_file)?;
            println!("✅ Updated student #{}", index);
        }
        Command::Delete { index } => {
            let removed = session.delete(index)?;
            session.save(&data_file)?;
            println!("✅ Deleted {} {}", removed.last_name, removed.first_name);
        }
        Command::List { sort } => {
            let records = session.records();
            if records.is_empty() {
                println!("The roster is empty");
            }
            let rows: Vec<(usize, &StudentRecord)> = match sort {
                Some(key) => sorted_view(records, key),
                None => records.iter().enumerate().collect(),
            };
            for (index, record) in rows {
                println!("#{:<3} {}", index, format_record(record));
            }
        }
        Command::Stats => {
            println!("{}", session.statistics());
        }
        Command::Export { path } => {
            session.export_csv(&path)?;
            println!("✅ Exported {} students to {}", session.records().len(), path);
        }
        Command::Import { path } => {
            let count = session.import_csv(&path)?;
            session.save(&data_file)?;
            println!("✅ Imported {} students from {}", count, path);
        }
        Command::Check(args) => {
            let draft = args.into_draft(today)?;
            session.check(&draft)?;
            println!("✅ All fields are valid");
        }
    }

    if session.is_modified() {
        tracing::warn!("Roster has unsaved changes");
    }

    Ok(())
}

fn format_record(record: &StudentRecord) -> String {
    format!(
        "{} {} {} | course {} | group {} | {} | {} | {}",
        record.last_name,
        record.first_name,
        record.middle_name,
        record.course,
        record.group,
        record.birth_date.format("%d.%m.%Y"),
        record.email,
        record.phone
    )
}
