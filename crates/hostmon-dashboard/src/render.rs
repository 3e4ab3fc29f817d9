use chrono::NaiveDateTime;
use hostmon_common::types::Sample;
use serde::Serialize;
use tera::{Context, Tera};

pub const PAGE_TEMPLATE: &str = "dashboard.html";

/// Readings shown by the grouped bar chart.
pub const BAR_CHART_ROWS: usize = 10;

const SAMPLE_CSV_COLUMNS: [&str; 6] = ["time", "cpu", "memory", "disk", "sent", "recv"];

pub fn build_templates() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_template(PAGE_TEMPLATE, include_str!("../templates/dashboard.html"))?;
    Ok(tera)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

#[derive(Debug, Clone, Serialize)]
pub struct LiveStats {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
}

impl From<&Sample> for LiveStats {
    fn from(s: &Sample) -> Self {
        Self {
            cpu: s.cpu_percent,
            memory: s.memory_percent,
            disk: s.disk_percent,
        }
    }
}

/// Series fed to the page's charts, oldest point first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub usage_labels: Vec<String>,
    pub cpu: Vec<f64>,
    pub memory: Vec<f64>,
    pub disk: Vec<f64>,
    pub network_labels: Vec<String>,
    pub sent: Vec<f64>,
    pub recv: Vec<f64>,
}

impl ChartData {
    /// `newest_first` is in store order; the bar view keeps only the most
    /// recent [`BAR_CHART_ROWS`].
    pub fn build(newest_first: &[Sample], kind: ChartKind) -> Self {
        let usage_rows = match kind {
            ChartKind::Line => newest_first,
            ChartKind::Bar => &newest_first[..newest_first.len().min(BAR_CHART_ROWS)],
        };

        let mut data = ChartData::default();
        for s in usage_rows.iter().rev() {
            data.usage_labels.push(s.formatted_time());
            data.cpu.push(s.cpu_percent);
            data.memory.push(s.memory_percent);
            data.disk.push(s.disk_percent);
        }
        for s in newest_first.iter().rev() {
            data.network_labels.push(s.formatted_time());
            data.sent.push(s.bytes_sent_mb);
            data.recv.push(s.bytes_recv_mb);
        }
        data
    }

    /// JSON safe to embed inside a `<script>` element.
    pub fn to_script_json(&self) -> serde_json::Result<String> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub refresh_secs: u64,
    pub refresh_min: u64,
    pub refresh_max: u64,
    pub chart: ChartKind,
    pub live: Option<LiveStats>,
    pub row_count: usize,
    pub latest_time: Option<String>,
    pub load_error: Option<String>,
    pub last_alert: Option<String>,
    pub log_missing: bool,
    pub log_file: String,
    pub chart_json: String,
}

pub fn render_page(tera: &Tera, view: &PageView) -> tera::Result<String> {
    let context = Context::from_serialize(view)?;
    tera.render(PAGE_TEMPLATE, &context)
}

/// CSV with a header row, samples in the given order.
pub fn samples_to_csv(samples: &[Sample]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(SAMPLE_CSV_COLUMNS)?;
    for sample in samples {
        writer.serialize(sample)?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// `server_log_<YYYYmmdd_HHMMSS>.<ext>`
pub fn download_filename(now: NaiveDateTime, ext: &str) -> String {
    format!("server_log_{}.{ext}", now.format("%Y%m%d_%H%M%S"))
}
