use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use super::keys::{self, *};
use super::query::{run_query, watch_query, Mutation};
use super::state::QueryState;
use crate::cache::QueryCache;
use crate::errors::RequestFailed;
use crate::models::notification::unread_count;
use crate::models::{
    AccountSettings, Application, ApplicationStatus, CandidateDashboard, CandidateProfile,
    CandidateTask, ContentRequest, Course, GeneratedContent, HiredCandidate, Internship,
    InternshipFilter, InternshipUpdate, NewApplication, NewInternship, NewTask, Notification,
    NotificationSettings, OfferDecision, PasswordChange, TaskStatus, Unit, UnitDashboard,
    UnitUpdate,
};
use crate::services::Services;
use crate::session::{Role, SessionProvider};
use crate::stores::SelectionStore;

/// Every query and mutation the dashboards use
#[derive(Clone)]
pub struct Hooks {
    services: Services,
    cache: QueryCache,
    session: SessionProvider,
    selection: SelectionStore,
}

impl Hooks {
    pub fn new(
        services: Services,
        cache: QueryCache,
        session: SessionProvider,
        selection: SelectionStore,
    ) -> Self {
        Self {
            services,
            cache,
            session,
            selection,
        }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn session(&self) -> &SessionProvider {
        &self.session
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    /// End the session and drop everything cached or selected under it
    pub async fn sign_out(&self) {
        self.session.sign_out();
        self.selection.clear();
        self.cache.clear().await;
    }

    /// Query scoped to one id; disabled while the id is missing
    async fn scoped<T, F, Fut>(&self, name: &str, id: Option<Uuid>, fetcher: F) -> QueryState<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(Uuid) -> Fut,
        Fut: Future<Output = Result<T, RequestFailed>>,
    {
        match id {
            Some(id) => run_query(&self.cache, keys::scoped(name, id), true, || fetcher(id)).await,
            None => {
                debug!(query = name, "Required parameter missing, query disabled");
                QueryState::idle()
            }
        }
    }

    fn user_with_role(&self, role: Role) -> Option<Uuid> {
        self.session
            .current()
            .filter(|session| session.role == role)
            .map(|session| session.user_id)
    }

    // Queries

    pub async fn internships(&self, filter: &InternshipFilter) -> QueryState<Vec<Internship>> {
        run_query(&self.cache, keys::internships(filter), true, || {
            self.services.internships.list(filter)
        })
        .await
    }

    pub async fn internship(&self, id: Option<Uuid>) -> QueryState<Internship> {
        self.scoped(INTERNSHIP, id, |id| self.services.internships.get(id))
            .await
    }

    pub async fn selected_internship(&self) -> QueryState<Internship> {
        self.internship(self.selection.current().internship_id).await
    }

    pub async fn unit_internships(&self, unit_id: Option<Uuid>) -> QueryState<Vec<Internship>> {
        self.scoped(UNIT_INTERNSHIPS, unit_id, |id| {
            self.services.internships.list_for_unit(id)
        })
        .await
    }

    pub async fn applicants(&self, internship_id: Option<Uuid>) -> QueryState<Vec<Application>> {
        self.scoped(APPLICANTS, internship_id, |id| {
            self.services.applications.list_for_internship(id)
        })
        .await
    }

    pub async fn selected_applicants(&self) -> QueryState<Vec<Application>> {
        self.applicants(self.selection.current().internship_id).await
    }

    pub async fn my_applications(&self) -> QueryState<Vec<Application>> {
        self.scoped(MY_APPLICATIONS, self.session.user_id(), |_| {
            self.services.applications.list_mine()
        })
        .await
    }

    pub async fn candidate_tasks(&self, application_id: Option<Uuid>) -> QueryState<Vec<CandidateTask>> {
        self.scoped(CANDIDATE_TASKS, application_id, |id| {
            self.services.tasks.list_for_application(id)
        })
        .await
    }

    pub async fn selected_candidate_tasks(&self) -> QueryState<Vec<CandidateTask>> {
        self.candidate_tasks(self.selection.current().application_id)
            .await
    }

    pub async fn notifications(&self) -> QueryState<Vec<Notification>> {
        self.scoped(NOTIFICATIONS, self.session.user_id(), |_| {
            self.services.notifications.list()
        })
        .await
    }

    pub async fn unread_notification_count(&self) -> QueryState<usize> {
        self.notifications()
            .await
            .map(|notifications| unread_count(&notifications))
    }

    /// Notifications resolved in the background, for observers that render
    /// the loading state
    pub fn watch_notifications(&self) -> watch::Receiver<QueryState<Vec<Notification>>> {
        let user_id = self.session.user_id();
        let key = keys::scoped(NOTIFICATIONS, user_id.unwrap_or_default());
        let service = self.services.notifications.clone();

        watch_query(self.cache.clone(), key, user_id.is_some(), move || async move {
            service.list().await
        })
    }

    pub async fn courses(&self) -> QueryState<Vec<Course>> {
        run_query(&self.cache, keys::all(COURSES), true, || {
            self.services.courses.list()
        })
        .await
    }

    pub async fn units(&self) -> QueryState<Vec<Unit>> {
        run_query(&self.cache, keys::all(UNITS), true, || self.services.units.list())
            .await
    }

    pub async fn unit(&self, unit_id: Option<Uuid>) -> QueryState<Unit> {
        self.scoped(UNIT, unit_id, |id| self.services.units.get(id)).await
    }

    pub async fn settings(&self) -> QueryState<AccountSettings> {
        self.scoped(SETTINGS, self.session.user_id(), |_| {
            self.services.settings.get()
        })
        .await
    }

    pub async fn hired_candidates(&self, unit_id: Option<Uuid>) -> QueryState<Vec<HiredCandidate>> {
        self.scoped(HIRED_CANDIDATES, unit_id, |id| {
            self.services.hired_candidates.list_for_unit(id)
        })
        .await
    }

    pub async fn candidate_profile(&self, candidate_id: Option<Uuid>) -> QueryState<CandidateProfile> {
        self.scoped(CANDIDATE_PROFILE, candidate_id, |id| {
            self.services.candidates.profile(id)
        })
        .await
    }

    /// Enabled only for a signed-in candidate
    pub async fn candidate_dashboard(&self) -> QueryState<CandidateDashboard> {
        self.scoped(CANDIDATE_DASHBOARD, self.user_with_role(Role::Candidate), |id| {
            self.services.dashboard.candidate(id)
        })
        .await
    }

    /// Enabled only for a signed-in unit
    pub async fn unit_dashboard(&self) -> QueryState<UnitDashboard> {
        self.scoped(UNIT_DASHBOARD, self.user_with_role(Role::Unit), |id| {
            self.services.dashboard.unit(id)
        })
        .await
    }

    // Mutations

    pub async fn create_internship(&self, internship: &NewInternship) -> Result<Internship, RequestFailed> {
        Mutation::new(&self.cache)
            .invalidates(all(INTERNSHIPS))
            .invalidates(all(UNIT_INTERNSHIPS))
            .invalidates(all(UNIT_DASHBOARD))
            .run(self.services.internships.create(internship))
            .await
    }

    pub async fn update_internship(
        &self,
        id: Uuid,
        update: &InternshipUpdate,
    ) -> Result<Internship, RequestFailed> {
        Mutation::new(&self.cache)
            .invalidates(all(INTERNSHIPS))
            .invalidates(scoped(INTERNSHIP, id))
            .invalidates(all(UNIT_INTERNSHIPS))
            .run(self.services.internships.update(id, update))
            .await
    }

    pub async fn delete_internship(&self, id: Uuid) -> Result<(), RequestFailed> {
        Mutation::new(&self.cache)
            .invalidates(all(INTERNSHIPS))
            .invalidates(scoped(INTERNSHIP, id))
            .invalidates(all(UNIT_INTERNSHIPS))
            .invalidates(all(UNIT_DASHBOARD))
            .run(self.services.internships.delete(id))
            .await?;

        if self.selection.current().internship_id == Some(id) {
            self.selection.select_internship(None);
        }
        Ok(())
    }

    pub async fn apply(&self, application: &NewApplication) -> Result<Application, RequestFailed> {
        Mutation::new(&self.cache)
            .invalidates(all(MY_APPLICATIONS))
            .invalidates(scoped(APPLICANTS, application.internship_id))
            .invalidates(all(CANDIDATE_DASHBOARD))
            .run(self.services.applications.apply(application))
            .await
    }

    pub async fn update_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Application, RequestFailed> {
        Mutation::new(&self.cache)
            .invalidates(all(APPLICANTS))
            .invalidates(all(HIRED_CANDIDATES))
            .invalidates(all(UNIT_DASHBOARD))
            .run(self.services.applications.update_status(id, status))
            .await
    }

    pub async fn update_offer_decision(
        &self,
        id: Uuid,
        decision: OfferDecision,
    ) -> Result<Application, RequestFailed> {
        Mutation::new(&self.cache)
            .invalidates(all(MY_APPLICATIONS))
            .invalidates(all(APPLICANTS))
            .invalidates(all(HIRED_CANDIDATES))
            .invalidates(all(CANDIDATE_DASHBOARD))
            .run(self.services.applications.update_offer_decision(id, decision))
            .await
    }

    pub async fn withdraw_application(&self, id: Uuid) -> Result<(), RequestFailed> {
        Mutation::new(&self.cache)
            .invalidates(all(MY_APPLICATIONS))
            .invalidates(all(APPLICANTS))
            .invalidates(all(CANDIDATE_DASHBOARD))
            .run(self.services.applications.withdraw(id))
            .await
    }

    pub async fn create_task(
        &self,
        application_id: Uuid,
        task: &NewTask,
    ) -> Result<CandidateTask, RequestFailed> {
        Mutation::new(&self.cache)
            .invalidates(scoped(CANDIDATE_TASKS, application_id))
            .invalidates(all(CANDIDATE_DASHBOARD))
            .run(self.services.tasks.create(application_id, task))
            .await
    }

    pub async fn update_task_status(
        &self,
        application_id: Uuid,
        task_id: Uuid,
        status: TaskStatus,
    ) -> Result<CandidateTask, RequestFailed> {
        Mutation::new(&self.cache)
            .invalidates(scoped(CANDIDATE_TASKS, application_id))
            .invalidates(all(CANDIDATE_DASHBOARD))
            .run(self.services.tasks.update_status(task_id, status))
            .await
    }

    pub async fn delete_task(&self, application_id: Uuid, task_id: Uuid) -> Result<(), RequestFailed> {
        Mutation::new(&self.cache)
            .invalidates(scoped(CANDIDATE_TASKS, application_id))
            .invalidates(all(CANDIDATE_DASHBOARD))
            .run(self.services.tasks.delete(task_id))
            .await
    }

    pub async fn mark_notification_read(&self, id: Uuid) -> Result<(), RequestFailed> {
        Mutation::new(&self.cache)
            .invalidates(all(NOTIFICATIONS))
            .run(self.services.notifications.mark_read(id))
            .await
    }

    pub async fn mark_all_notifications_read(&self) -> Result<(), RequestFailed> {
        Mutation::new(&self.cache)
            .invalidates(all(NOTIFICATIONS))
            .run(self.services.notifications.mark_all_read())
            .await
    }

    pub async fn clear_notifications(&self) -> Result<(), RequestFailed> {
        Mutation::new(&self.cache)
            .invalidates(all(NOTIFICATIONS))
            .run(self.services.notifications.clear_all())
            .await
    }

    pub async fn update_notification_settings(
        &self,
        settings: &NotificationSettings,
    ) -> Result<NotificationSettings, RequestFailed> {
        Mutation::new(&self.cache)
            .invalidates(all(SETTINGS))
            .run(self.services.settings.update_notifications(settings))
            .await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), RequestFailed> {
        Mutation::new(&self.cache)
            .run(self.services.settings.change_password(change))
            .await
    }

    pub async fn update_unit(&self, id: Uuid, update: &UnitUpdate) -> Result<Unit, RequestFailed> {
        Mutation::new(&self.cache)
            .invalidates(all(UNITS))
            .invalidates(scoped(UNIT, id))
            .run(self.services.units.update(id, update))
            .await
    }

    pub async fn update_profile(
        &self,
        candidate_id: Uuid,
        profile: &CandidateProfile,
    ) -> Result<CandidateProfile, RequestFailed> {
        Mutation::new(&self.cache)
            .invalidates(scoped(CANDIDATE_PROFILE, candidate_id))
            .run(self.services.candidates.update_profile(candidate_id, profile))
            .await
    }

    pub async fn generate_description(&self, request: &ContentRequest) -> Result<GeneratedContent, RequestFailed> {
        Mutation::new(&self.cache)
            .run(self.services.ai_content.generate_description(request))
            .await
    }

    pub async fn generate_cover_letter(&self, request: &ContentRequest) -> Result<GeneratedContent, RequestFailed> {
        Mutation::new(&self.cache)
            .run(self.services.ai_content.generate_cover_letter(request))
            .await
    }
}
