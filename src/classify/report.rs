use crate::classify::bucket::BinLayer;
use crate::classify::convert::is_undefined;

/// Summary of one classification pass: how many observations landed in each
/// bin, how many were missing at the source, and how many fell through
/// every bin (possible under the literal bottom-bin policy).
#[derive(Debug, Clone)]
pub struct ClassificationReport {
    pub total: usize,
    pub missing: usize,
    pub unclassified: usize,
    pub bin_counts: Vec<(f64, usize)>,
}

impl ClassificationReport {
    pub fn from_layers(converted: &[f64], layers: &[BinLayer]) -> Self {
        let total = converted.len();
        let missing = converted.iter().filter(|&&v| is_undefined(v)).count();

        let bin_counts: Vec<(f64, usize)> = layers
            .iter()
            .map(|layer| (layer.level, layer.defined_count()))
            .collect();

        let classified: usize = bin_counts.iter().map(|(_, n)| n).sum();
        let unclassified = total - missing - classified;

        Self {
            total,
            missing,
            unclassified,
            bin_counts,
        }
    }

    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push("Classification Report".to_string());
        lines.push("=====================".to_string());
        lines.push(format!("Total observations:  {}", self.total));
        lines.push(format!("Missing (sentinel):  {}", self.missing));
        lines.push(format!("Unclassified:        {}", self.unclassified));
        lines.push(String::new());
        lines.push("Bin counts:".to_string());

        for (i, (level, count)) in self.bin_counts.iter().enumerate() {
            let label = if i == self.bin_counts.len() - 1 {
                format!(">= {:.1}", level)
            } else if i == 0 {
                format!("bin @ {:.1}", level)
            } else {
                format!("[{:.1}, ...)", level)
            };
            lines.push(format!("  {:<14} {}", label, count));
        }

        lines.join("\n")
    }
}
