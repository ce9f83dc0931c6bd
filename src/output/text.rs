//! Human-readable text output

use super::RunResult;
use std::fmt;

impl RunResult {
    /// Sentence describing the median record, if found
    pub fn median_record_str(&self) -> String {
        match self.median_record {
            Some(ref record) => format!("A median record is {} {}.", record.fname, record.lname),
            None => "No median record found.".to_string(),
        }
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "This program completed in {:.3} seconds", self.elapsed_sec())?;
        writeln!(f, "using {} threads.", self.num_threads)?;
        writeln!(f, "The average age is {} years and", format_age(self.average_age))?;
        writeln!(f, "The median age is {} years.", format_age(self.median_age))?;
        write!(f, "{}", self.median_record_str())?;

        if self.files_total > 0 {
            write!(
                f,
                "\nRead {} row(s) from {} of {} file(s).",
                format_number(self.rows as u64),
                self.files_total - self.files_failed,
                self.files_total
            )?;
        }

        if let Some(ref resources) = self.resources {
            write!(
                f,
                "\nResources: CPU {:.1}%, memory {} (peak: {}), {} samples.",
                resources.cpu_percent,
                format_bytes(resources.memory_bytes),
                format_bytes(resources.peak_memory_bytes),
                resources.samples
            )?;
        }

        Ok(())
    }
}

/// Format an age value; whole numbers keep one decimal place
pub fn format_age(age: f64) -> String {
    if age.is_finite() && age.fract() == 0.0 {
        format!("{:.1}", age)
    } else {
        format!("{}", age)
    }
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, c) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}

/// Format bytes with appropriate units
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
