use console::{Style, Term};
use std::path::Path;

use pill_core::Medicine;
use pill_types::{DueReminder, Reminder};

/// 命令行输出格式化工具
/// 提供统一的 Cargo 风格输出
#[derive(Clone)]
pub struct Output {
    green: Style,
    bold: Style,
    dim: Style,
}

impl Output {
    pub fn new() -> Self {
        Self {
            green: Style::new().green().bold(),
            bold: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }

    /// 显示状态消息（如 "Added Aspirin" 等）
    /// 格式: "       Added Aspirin"（动词右对齐到 12 字符）
    pub fn status(&self, action: &str, target: &str) {
        eprintln!("{:>12} {}", self.green.apply_to(action), target);
    }

    /// 显示会话信息
    /// 格式: "     Session global scope (checking every 60s, dispenser 192.168.241.163)"
    /// 自动在后面添加空行
    pub fn session_info(&self, scope: &str, poll_secs: u64, dispenser: Option<&str>) {
        let device = match dispenser {
            Some(address) => format!("dispenser {}", address),
            None => "dispenser disabled".to_string(),
        };
        eprintln!(
            "{:>12} {} scope {}",
            self.green.apply_to("Session"),
            scope,
            self.dim
                .apply_to(format!("(checking every {}s, {})", poll_secs, device))
        );
        eprintln!();
    }

    /// 显示创建/查找资源消息
    /// 格式: "    Creating config at /path/to/config"
    /// 自动在后面添加空行
    pub fn resource_action(&self, action: &str, resource: &str, path: &Path) {
        eprintln!(
            "{:>12} {} at {}",
            self.green.apply_to(action),
            resource,
            path.display()
        );
        eprintln!();
    }

    /// 显示完成消息
    /// 格式: "    Finished action for scope"
    /// 自动在前面添加空行
    pub fn finish(&self, action: &str, scope: &str) {
        eprintln!();
        eprintln!(
            "{:>12} {} for {} scope",
            self.green.apply_to("Finished"),
            action,
            scope
        );
    }

    /// 显示单个提醒
    /// 格式: "[1/3] Aspirin"
    ///       "      Dosage: 1"
    ///       "      Time: 08:05 AM"
    ///       "      Slot: 1"
    fn reminder_item(&self, index: usize, total: usize, reminder: &Reminder) {
        let index_part = format!("{}/{}", index, total);
        println!(
            "[{}] {}",
            self.dim.apply_to(&index_part),
            self.bold.apply_to(&reminder.name)
        );

        let indent = " ".repeat(index_part.len() + 3);
        println!("{}{} {}", indent, self.dim.apply_to("Dosage:"), reminder.dosage);
        println!("{}{} {}", indent, self.dim.apply_to("Time:"), reminder.time);
        if let Some(slot) = reminder.slot {
            println!("{}{} {}", indent, self.dim.apply_to("Slot:"), slot);
        }
    }

    /// 显示提醒列表（自动处理分隔和格式化）
    pub fn reminder_list(&self, reminders: &[Reminder]) {
        if reminders.is_empty() {
            self.info("No reminders yet.");
            self.info("Add your first medicine reminder!");
            return;
        }

        let total = reminders.len();
        for (i, reminder) in reminders.iter().enumerate() {
            self.reminder_item(i + 1, total, reminder);

            // 只在非最后一个结果后添加空行分隔
            if i < total - 1 {
                println!();
            }
        }
    }

    /// 到期提醒文本（不含换行）
    fn due_line(&self, due: &DueReminder) -> String {
        let slot = due
            .slot
            .map(|s| format!(" {}", self.dim.apply_to(format!("(slot {})", s))))
            .unwrap_or_default();
        format!(
            "{:>12} It's time to take your medicine: {}{}",
            Style::new().cyan().bold().apply_to("Reminder"),
            self.bold.apply_to(&due.name),
            slot
        )
    }

    /// 显示到期提醒
    /// 与 dialoguer 提示共用 stderr：先清掉当前提示行，前后空行便于辨认
    pub fn reminder_due(&self, due: &DueReminder) {
        let term = Term::stderr();
        let written = term
            .clear_line()
            .and_then(|_| term.write_line(""))
            .and_then(|_| term.write_line(&self.due_line(due)))
            .and_then(|_| term.write_line(""));
        if let Err(e) = written {
            tracing::warn!("Failed to show reminder for {}: {}", due.name, e);
        }
    }

    /// 显示药品表
    pub fn medicine_table(&self, medicines: &[&Medicine]) {
        let width = medicines.iter().map(|m| m.name.len()).max().unwrap_or(0);
        for medicine in medicines {
            println!(
                "{:>12} {:<width$} {}",
                "",
                medicine.name,
                self.dim.apply_to(format!(
                    "{}-{} tablets",
                    medicine.min_dosage, medicine.max_dosage
                )),
                width = width
            );
        }
    }

    /// 显示注意事项（右对齐）
    pub fn note(&self, message: &str) {
        eprintln!("{:>12} {}", self.dim.apply_to("Note"), message);
    }

    /// 显示警告（黄色，右对齐）
    /// 自动在前面添加空行
    pub fn warning(&self, message: &str) {
        eprintln!();
        eprintln!(
            "{:>12} {}",
            Style::new().yellow().bold().apply_to("Warning"),
            message
        );
        eprintln!();
    }

    /// 显示错误（红色，右对齐）
    pub fn error(&self, message: &str) {
        eprintln!(
            "{:>12} {}",
            Style::new().red().bold().apply_to("Error"),
            message
        );
    }

    /// 显示提示消息（标准输出，右对齐）
    pub fn info(&self, message: &str) {
        println!("{:>12} {}", "", message);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
