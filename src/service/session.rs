use std::sync::Arc;

use anyhow::{Context, Result};
use dialoguer::{Confirm, Input, Select};
use pill_core::{MedicineCatalog, Notifier, ReminderDraft, ReminderStore, SystemClock};
use pill_dispenser::DispenserClient;
use pill_types::{Meridiem, Slot};
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::ui::Output;

const MENU: [&str; 4] = ["Add reminder", "View reminders", "Delete reminder", "Quit"];

/// Everything one session owns. Dropped (and forgotten) on quit.
struct Session {
    output: Output,
    store: ReminderStore,
    catalog: MedicineCatalog,
    dispenser: DispenserClient,
}

/// 交互式会话：提醒只保存在内存中，退出即丢弃
pub async fn session(force_local: bool, force_global: bool) -> Result<()> {
    let output = Output::new();
    let config = AppConfig::load_with_scope(force_local, force_global)?;
    let scope = AppConfig::get_scope_name(force_local, force_global);

    let dispenser = DispenserClient::new(&config.dispenser)?;
    output.session_info(
        scope,
        config.poll_interval_secs,
        dispenser.is_enabled().then(|| dispenser.address()),
    );

    let session = Session {
        output: output.clone(),
        store: ReminderStore::new(),
        catalog: config.catalog(),
        dispenser,
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let notifier = Notifier::new(
        session.store.subscribe(),
        Arc::new(SystemClock),
        config.poll_interval(),
    )
    .start(tx);

    let alert_output = output.clone();
    let alerts = tokio::spawn(async move {
        while let Some(due) = rx.recv().await {
            alert_output.reminder_due(&due);
        }
    });

    let result = session.run().await;

    notifier.stop().await;
    // The notifier held the only sender, so this drains and ends
    if let Err(e) = alerts.await {
        tracing::warn!("Alert printer ended abnormally: {}", e);
    }

    output.finish("session", scope);
    result
}

impl Session {
    async fn run(&self) -> Result<()> {
        loop {
            let choice = prompt(|| {
                Select::new()
                    .with_prompt("What would you like to do?")
                    .items(&MENU)
                    .default(0)
                    .interact()
            })
            .await?;

            match choice {
                0 => self.add().await?,
                1 => self.view(),
                2 => self.delete().await?,
                _ => return Ok(()),
            }
            println!();
        }
    }

    async fn add(&self) -> Result<()> {
        let draft = prompt(read_draft).await?;

        let reminder = match draft.into_reminder(&self.catalog) {
            Ok(reminder) => reminder,
            Err(e) => {
                self.output.error(&e.to_string());
                return Ok(());
            }
        };

        if let Err(e) = self.store.add(reminder.clone()) {
            self.output.error(&e.to_string());
            return Ok(());
        }

        self.output.status(
            "Added",
            &format!("{} at {}", reminder.name, reminder.time),
        );

        // Fire-and-forget: the outcome only shows up in the log
        if self.dispenser.notify(&reminder).is_some() {
            self.output
                .status("Sending", &format!("{} to dispenser", reminder.name));
        }
        Ok(())
    }

    fn view(&self) {
        self.output.reminder_list(&self.store.snapshot());
    }

    async fn delete(&self) -> Result<()> {
        let snapshot = self.store.snapshot();
        if snapshot.is_empty() {
            self.output.info("No reminders yet.");
            return Ok(());
        }

        let mut items: Vec<String> = snapshot
            .iter()
            .map(|r| format!("{} ({}, {})", r.name, r.dosage, r.time))
            .collect();
        items.push("Cancel".to_string());

        let choice = prompt(move || {
            Select::new()
                .with_prompt("Delete which reminder?")
                .items(&items)
                .default(0)
                .interact()
        })
        .await?;

        let Some(target) = snapshot.get(choice) else {
            return Ok(());
        };

        self.output
            .warning(&format!("this will delete the reminder for {}", target.name));
        let confirmed = prompt(|| {
            Confirm::new()
                .with_prompt("Are you sure you want to delete this reminder?")
                .default(false)
                .interact()
        })
        .await?;

        if !confirmed {
            self.output.info("Operation cancelled");
            return Ok(());
        }

        match self.store.remove(&target.id) {
            Some(removed) => self.output.status("Deleted", &removed.name),
            None => self.output.info("Reminder was already removed"),
        }
        Ok(())
    }
}

/// 阻塞式提示放到 blocking 线程，提醒检查不受影响
async fn prompt<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> dialoguer::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .context("Prompt task failed")?
        .context("Failed to read input")
}

fn read_draft() -> dialoguer::Result<ReminderDraft> {
    let name: String = Input::new()
        .with_prompt("Medicine name")
        .allow_empty(true)
        .interact_text()?;

    let dosage: String = Input::new()
        .with_prompt("Dosage (tablets)")
        .allow_empty(true)
        .interact_text()?;

    let hours: Vec<String> = (1..=12).map(|h| h.to_string()).collect();
    let hour_index = Select::new()
        .with_prompt("Hour")
        .items(&hours)
        .default(11)
        .interact()?;

    let minute: u32 = Input::new()
        .with_prompt("Minute (0-59)")
        .default(0)
        .validate_with(|m: &u32| {
            if *m < 60 {
                Ok(())
            } else {
                Err("minute must be between 0 and 59")
            }
        })
        .interact_text()?;

    let meridiems = [Meridiem::Am, Meridiem::Pm];
    let meridiem_index = Select::new()
        .with_prompt("AM/PM")
        .items(&meridiems)
        .default(0)
        .interact()?;

    let slots: Vec<String> = Slot::ALL.iter().map(|s| format!("Slot {}", s)).collect();
    let slot_index = Select::new()
        .with_prompt("Slot")
        .items(&slots)
        .default(0)
        .interact()?;

    Ok(ReminderDraft {
        name,
        dosage,
        hour12: Some(hour_index as u32 + 1),
        minute: Some(minute),
        meridiem: Some(meridiems[meridiem_index]),
        slot: Some(Slot::ALL[slot_index]),
    })
}
