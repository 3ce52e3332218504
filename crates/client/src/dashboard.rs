//! Project dashboard view-model: status filter, project cards and the
//! inline create-project form.

use chrono::NaiveDate;
use orgboard_core::error::CoreError;
use orgboard_core::status::ProjectStatus;
use orgboard_core::validation::{validate_name, MAX_PROJECT_NAME_LEN};

use crate::error::ClientResult;
use crate::models::{NewProject, Project};
use crate::store::Store;

// ---------------------------------------------------------------------------
// Status filter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
    OnHold,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [Self::All, Self::Active, Self::Completed, Self::OnHold];

    /// The `status` argument to send with `projects`.
    pub fn status(&self) -> Option<ProjectStatus> {
        match self {
            Self::All => None,
            Self::Active => Some(ProjectStatus::Active),
            Self::Completed => Some(ProjectStatus::Completed),
            Self::OnHold => Some(ProjectStatus::OnHold),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
        }
    }
}

// ---------------------------------------------------------------------------
// Project card
// ---------------------------------------------------------------------------

/// Display-ready summary of one project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCard {
    pub id: String,
    pub name: String,
    pub status_label: &'static str,
    /// e.g. `1/2 tasks`.
    pub progress_label: String,
    /// Completion rate rounded to a whole percent.
    pub percent: u8,
    pub due_date: Option<NaiveDate>,
}

impl From<&Project> for ProjectCard {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            status_label: project.status.label(),
            progress_label: format!("{}/{} tasks", project.completed_tasks, project.task_count),
            percent: project.completion_rate.clamp(0.0, 100.0).round() as u8,
            due_date: project.due_date,
        }
    }
}

// ---------------------------------------------------------------------------
// Create-project form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub due_date: Option<NaiveDate>,
}

impl ProjectForm {
    /// Field errors to show before submitting; empty when the form is valid.
    pub fn validate(&self) -> Vec<String> {
        match validate_name("name", &self.name, MAX_PROJECT_NAME_LEN) {
            Ok(()) => Vec::new(),
            Err(CoreError::Validation(msg)) => vec![msg],
            Err(other) => vec![other.to_string()],
        }
    }

    /// `createProject` variables for this form, or the field errors.
    pub fn to_input(&self, organization_slug: &str) -> Result<NewProject, Vec<String>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        let description = self.description.trim();
        Ok(NewProject {
            organization_slug: organization_slug.to_string(),
            name: self.name.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            status: Some(self.status),
            due_date: self.due_date,
        })
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Projects of one organization under the current filter.
#[derive(Debug, Clone)]
pub struct Dashboard {
    organization_slug: String,
    filter: StatusFilter,
    projects: Vec<Project>,
    pub form: ProjectForm,
    pub form_errors: Vec<String>,
}

impl Dashboard {
    pub fn new(organization_slug: impl Into<String>) -> Self {
        Self {
            organization_slug: organization_slug.into(),
            filter: StatusFilter::All,
            projects: Vec::new(),
            form: ProjectForm::default(),
            form_errors: Vec::new(),
        }
    }

    pub fn organization_slug(&self) -> &str {
        &self.organization_slug
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn cards(&self) -> Vec<ProjectCard> {
        self.projects.iter().map(ProjectCard::from).collect()
    }

    /// Fetch the project list for the current filter.
    pub async fn load(&mut self, store: &Store) -> ClientResult<()> {
        self.projects = store
            .projects(&self.organization_slug, self.filter.status())
            .await?;
        Ok(())
    }

    /// Switch filter and re-issue `projects` with the new argument.
    pub async fn set_filter(&mut self, store: &Store, filter: StatusFilter) -> ClientResult<()> {
        self.filter = filter;
        self.load(store).await
    }

    /// Submit the inline form. Returns `Ok(true)` when the project was
    /// created; field or server errors land in `form_errors`.
    pub async fn submit_form(&mut self, store: &Store) -> ClientResult<bool> {
        let input = match self.form.to_input(&self.organization_slug) {
            Ok(input) => input,
            Err(errors) => {
                self.form_errors = errors;
                return Ok(false);
            }
        };

        match store.create_project(&input).await?.into_result() {
            Ok(project) => {
                tracing::debug!(project_id = %project.id, "Project created from dashboard");
                self.form = ProjectForm::default();
                self.form_errors.clear();
                self.load(store).await?;
                Ok(true)
            }
            Err(errors) => {
                self.form_errors = errors;
                Ok(false)
            }
        }
    }
}
