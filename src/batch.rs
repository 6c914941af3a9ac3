//! Batch generation of req2req embedding configurations, one file per dataset
//!
//! Placeholders are replaced literally; the template is not parsed.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::document::export::write_text;
use crate::error::ToolResult;

/// Output directory used when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "configs/req2req-embedding";

pub const CLASSIFIER_MODE: &str = "mock";

pub const TEMPLATE: &str = r#"
{
  "cache_dir": "./cache/<<DATASET>>",

  "gold_standard_configuration": {
    "path": "./datasets/req2req/<<DATASET>>/answer.csv",
    "hasHeader": "true"
  },

  "source_artifact_provider" : {
    "name" : "text",
    "args" : {
      "artifact_type" : "requirement",
      "path" : "./datasets/req2req/<<DATASET>>/high"
    }
  },
  "target_artifact_provider" : {
    "name" : "text",
    "args" : {
      "artifact_type" : "requirement",
      "path" : "./datasets/req2req/<<DATASET>>/low"
    }
  },
  "source_preprocessor" : {
    "name" : "artifact",
    "args" : {}
  },
  "target_preprocessor" : {
    "name" : "artifact",
    "args" : {}
  },
  "embedding_creator" : {
    "name" : "ollama",
    "args" : {
      "model": "qwen3-embedding:8b"
    }
  },
  "source_store" : {
    "name" : "custom",
    "args" : { }
  },
  "target_store" : {
    "name" : "custom",
    "args" : {
      "max_results" : "<<RETRIEVAL_COUNT>>"
    }
  },
  "classifier" : {
    "name" : "<<CLASSIFIER_MODE>>",
    "args" : {
      <<ARGS>>
    }
  },
  "result_aggregator" : {
    "name" : "any_connection",
    "args" : {}
  },
  "tracelinkid_postprocessor" : {
    "name" : "<<POSTPROCESSOR>>",
    "args" : {}
  }
}
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchEntry {
    pub dataset: &'static str,
    pub postprocessor: &'static str,
    pub retrieval_count: u32,
}

pub const BATCH: [BatchEntry; 5] = [
    BatchEntry { dataset: "GANNT", postprocessor: "req2req", retrieval_count: 4 },
    BatchEntry { dataset: "ModisDataset", postprocessor: "identity", retrieval_count: 4 },
    BatchEntry { dataset: "WARC", postprocessor: "req2req", retrieval_count: 4 },
    BatchEntry { dataset: "dronology", postprocessor: "identity", retrieval_count: 4 },
    BatchEntry { dataset: "CM1-NASA", postprocessor: "identity", retrieval_count: 4 },
];

impl BatchEntry {
    pub fn file_name(&self) -> String {
        format!("{}_no_llm.json", self.dataset)
    }

    /// Substitute this entry's values into `TEMPLATE`
    pub fn render(&self, classifier_mode: &str, args: &str) -> String {
        TEMPLATE
            .replace("<<DATASET>>", self.dataset)
            .replace("<<CLASSIFIER_MODE>>", classifier_mode)
            .replace("<<ARGS>>", args)
            .replace("<<POSTPROCESSOR>>", self.postprocessor)
            .replace("<<RETRIEVAL_COUNT>>", &self.retrieval_count.to_string())
    }
}

/// Write every batch entry into `out_dir`, creating it if needed
pub fn generate(out_dir: &Path) -> ToolResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(BATCH.len());
    for entry in BATCH.iter() {
        let path = out_dir.join(entry.file_name());
        write_text(&path, &entry.render(CLASSIFIER_MODE, ""))?;
        info!(dataset = entry.dataset, path = %path.display(), "Generated configuration");
        written.push(path);
    }
    Ok(written)
}
