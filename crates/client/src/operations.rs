//! GraphQL documents for every query and mutation the API exposes.
//!
//! Each entity has one field selection shared by all operations, so cached
//! entries always carry the same field set.

macro_rules! organization_fields {
    () => {
        "id name slug contactEmail createdAt"
    };
}

macro_rules! project_fields {
    () => {
        concat!(
            "id name description status dueDate createdAt updatedAt ",
            "taskCount completedTasks completionRate"
        )
    };
}

macro_rules! task_fields {
    () => {
        concat!(
            "id title description status assigneeEmail dueDate createdAt updatedAt ",
            "isOverdue commentCount"
        )
    };
}

macro_rules! comment_fields {
    () => {
        "id content authorEmail createdAt"
    };
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

pub const ORGANIZATIONS: &str = concat!("query { organizations { ", organization_fields!(), " } }");

pub const ORGANIZATION: &str = concat!(
    "query($slug: String!) { organization(slug: $slug) { ",
    organization_fields!(),
    " } }"
);

pub const PROJECTS: &str = concat!(
    "query($organizationSlug: String!, $status: ProjectStatus) { ",
    "projects(organizationSlug: $organizationSlug, status: $status) { ",
    project_fields!(),
    " } }"
);

pub const PROJECT: &str = concat!(
    "query($id: ID!) { project(id: $id) { ",
    project_fields!(),
    " } }"
);

pub const TASKS: &str = concat!(
    "query($projectId: ID!, $status: TaskStatus) { ",
    "tasks(projectId: $projectId, status: $status) { ",
    task_fields!(),
    " } }"
);

pub const TASK: &str = concat!("query($id: ID!) { task(id: $id) { ", task_fields!(), " } }");

pub const TASK_COMMENTS: &str = concat!(
    "query($taskId: ID!) { taskComments(taskId: $taskId) { ",
    comment_fields!(),
    " } }"
);

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

pub const CREATE_ORGANIZATION: &str = concat!(
    "mutation($name: String!, $slug: String!, $contactEmail: String!) { ",
    "createOrganization(name: $name, slug: $slug, contactEmail: $contactEmail) { ",
    "success errors organization { ",
    organization_fields!(),
    " } } }"
);

pub const UPDATE_ORGANIZATION: &str = concat!(
    "mutation($slug: String!, $name: String, $contactEmail: String) { ",
    "updateOrganization(slug: $slug, name: $name, contactEmail: $contactEmail) { ",
    "success errors organization { ",
    organization_fields!(),
    " } } }"
);

pub const DELETE_ORGANIZATION: &str =
    "mutation($slug: String!) { deleteOrganization(slug: $slug) { success errors } }";

pub const CREATE_PROJECT: &str = concat!(
    "mutation($organizationSlug: String!, $name: String!, $description: String, ",
    "$status: ProjectStatus, $dueDate: NaiveDate) { ",
    "createProject(organizationSlug: $organizationSlug, name: $name, description: $description, ",
    "status: $status, dueDate: $dueDate) { ",
    "success errors project { ",
    project_fields!(),
    " } } }"
);

pub const UPDATE_PROJECT: &str = concat!(
    "mutation($projectId: ID!, $name: String, $description: String, ",
    "$status: ProjectStatus, $dueDate: NaiveDate) { ",
    "updateProject(projectId: $projectId, name: $name, description: $description, ",
    "status: $status, dueDate: $dueDate) { ",
    "success errors project { ",
    project_fields!(),
    " } } }"
);

pub const DELETE_PROJECT: &str =
    "mutation($projectId: ID!) { deleteProject(projectId: $projectId) { success errors } }";

pub const CREATE_TASK: &str = concat!(
    "mutation($projectId: ID!, $title: String!, $description: String, $status: TaskStatus, ",
    "$assigneeEmail: String, $dueDate: DateTime) { ",
    "createTask(projectId: $projectId, title: $title, description: $description, ",
    "status: $status, assigneeEmail: $assigneeEmail, dueDate: $dueDate) { ",
    "success errors task { ",
    task_fields!(),
    " } } }"
);

pub const UPDATE_TASK: &str = concat!(
    "mutation($taskId: ID!, $title: String, $description: String, $status: TaskStatus, ",
    "$assigneeEmail: String, $dueDate: DateTime) { ",
    "updateTask(taskId: $taskId, title: $title, description: $description, ",
    "status: $status, assigneeEmail: $assigneeEmail, dueDate: $dueDate) { ",
    "success errors task { ",
    task_fields!(),
    " } } }"
);

pub const DELETE_TASK: &str =
    "mutation($taskId: ID!) { deleteTask(taskId: $taskId) { success errors } }";

pub const CREATE_TASK_COMMENT: &str = concat!(
    "mutation($taskId: ID!, $content: String!, $authorEmail: String!) { ",
    "createTaskComment(taskId: $taskId, content: $content, authorEmail: $authorEmail) { ",
    "success errors comment { ",
    comment_fields!(),
    " } } }"
);
