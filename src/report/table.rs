use crate::batch::BatchReport;

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub precision: usize,
    pub index_header: String,
    pub score_header: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            precision: 2,
            index_header: "Image Filename".into(),
            score_header: "Shadow Factor (%)".into(),
        }
    }
}

impl ReportConfig {
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn format_score(&self, score: f64) -> String {
        format!("{:.*}%", self.precision, score)
    }
}

/// Successful scores keyed by file name, in batch order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsTable {
    pub index_header: String,
    pub score_header: String,
    pub rows: Vec<(String, String)>,
}

impl ResultsTable {
    pub fn from_report(report: &BatchReport, config: &ReportConfig) -> Self {
        Self {
            index_header: config.index_header.clone(),
            score_header: config.score_header.clone(),
            rows: report
                .successes()
                .map(|(name, score)| (name.to_string(), config.format_score(score)))
                .collect(),
        }
    }

    /// Column header on the first line, index header on the second, then one
    /// row per image with left-aligned names and right-aligned scores.
    pub fn render(&self) -> String {
        let index_width = self
            .rows
            .iter()
            .map(|(name, _)| name.chars().count())
            .chain(std::iter::once(self.index_header.chars().count()))
            .max()
            .unwrap_or(0);
        let score_width = self
            .rows
            .iter()
            .map(|(_, score)| score.chars().count())
            .chain(std::iter::once(self.score_header.chars().count()))
            .max()
            .unwrap_or(0);

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(format!(
            "{:index_width$}  {:>score_width$}",
            "", self.score_header
        ));
        lines.push(format!(
            "{:<index_width$}  {:score_width$}",
            self.index_header, ""
        ));

        for (name, score) in &self.rows {
            lines.push(format!("{:<index_width$}  {:>score_width$}", name, score));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_score() {
        let config = ReportConfig::default();
        assert_eq!(config.format_score(7.843137), "7.84%");
        assert_eq!(config.format_score(0.0), "0.00%");
        assert_eq!(config.with_precision(1).format_score(12.36), "12.4%");
    }

    #[test]
    fn test_render_alignment() {
        let table = ResultsTable {
            index_header: "Image Filename".into(),
            score_header: "Shadow Factor (%)".into(),
            rows: vec![
                ("a.png".into(), "7.84%".into()),
                ("a_much_longer_name.jpg".into(), "12.00%".into()),
            ],
        };

        let rendered = table.render();
        let lines = rendered.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].trim_end(), "Image Filename");
        assert_eq!(lines[1].len(), lines[0].len());
        assert!(lines[0].ends_with("Shadow Factor (%)"));
        assert!(lines[2].starts_with("a.png "));
        assert!(lines[2].ends_with(" 7.84%"));
        assert_eq!(lines[0].len(), lines[2].len());
        assert_eq!(lines[2].len(), lines[3].len());
    }
}
