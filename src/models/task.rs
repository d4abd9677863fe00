//! Task metadata attached to a report.

use serde::Serialize;

use crate::models::report::TaskElement;

/// The task a report was produced by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportTask {
    pub id: Option<String>,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub target_id: Option<String>,
    pub progress: Option<u64>,
}

impl ReportTask {
    pub fn from_element(element: &TaskElement) -> Self {
        Self {
            id: element.id.clone(),
            name: element.name.clone(),
            comment: element.comment.clone(),
            target_id: element
                .target
                .as_ref()
                .and_then(|target| target.id.clone()),
            progress: element.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_task_from_element() {
        let element: TaskElement = serde_json::from_value(json!({
            "_id": "t-1",
            "name": "Weekly scan",
            "target": {"_id": "tgt-9"},
            "progress": {"__text": "42"},
        }))
        .unwrap();
        let task = ReportTask::from_element(&element);
        assert_eq!(task.id.as_deref(), Some("t-1"));
        assert_eq!(task.target_id.as_deref(), Some("tgt-9"));
        assert_eq!(task.progress, Some(42));
    }
}
