use uuid::Uuid;

use crate::api::{ApiClient, ApiRequest};
use crate::errors::RequestFailed;
use crate::models::task::TaskStatusChange;
use crate::models::{CandidateTask, NewTask, TaskStatus};

#[derive(Clone)]
pub struct TaskService {
    api: ApiClient,
}

impl TaskService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_for_application(
        &self,
        application_id: Uuid,
    ) -> Result<Vec<CandidateTask>, RequestFailed> {
        self.api
            .call_list(
                ApiRequest::get(
                    "tasks.list_for_application",
                    format!("/applications/{}/tasks", application_id),
                ),
                "Failed to fetch tasks",
            )
            .await
    }

    pub async fn create(
        &self,
        application_id: Uuid,
        task: &NewTask,
    ) -> Result<CandidateTask, RequestFailed> {
        self.api
            .call(
                ApiRequest::post("tasks.create", format!("/applications/{}/tasks", application_id))
                    .json(task),
                CandidateTask::default(),
                "Failed to create task",
            )
            .await
    }

    pub async fn update_status(
        &self,
        task_id: Uuid,
        status: TaskStatus,
    ) -> Result<CandidateTask, RequestFailed> {
        self.api
            .call(
                ApiRequest::patch("tasks.update_status", format!("/tasks/{}", task_id))
                    .json(&TaskStatusChange { status }),
                CandidateTask::default(),
                "Failed to update task",
            )
            .await
    }

    pub async fn delete(&self, task_id: Uuid) -> Result<(), RequestFailed> {
        self.api
            .call_unit(
                ApiRequest::delete("tasks.delete", format!("/tasks/{}", task_id)),
                "Failed to delete task",
            )
            .await
    }
}
