//! Top-level list screen: owns the user list, both forms, the search query
//! and the current navigation entry, and routes form results back into the
//! list.

use crate::controller::{Confirm, DeleteOutcome, UserListController};
use crate::detail::DetailView;
use crate::forms::{AddUserForm, EditUserForm, FormError};
use crate::model::{UserId, UserRecord};
use crate::notify::Notifier;
use crate::routes::Navigation;
use crate::service::UserService;
use std::sync::Arc;

pub struct App {
    service: Arc<dyn UserService>,
    pub list: UserListController,
    pub add_form: AddUserForm,
    pub edit_form: EditUserForm,
    query: String,
    nav: Navigation,
}

impl App {
    pub fn new(service: Arc<dyn UserService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            list: UserListController::new(service.clone(), notifier.clone()),
            add_form: AddUserForm::new(notifier.clone()),
            edit_form: EditUserForm::new(notifier),
            service,
            query: String::new(),
            nav: Navigation::list(),
        }
    }

    pub fn with_release_busy_on_cancel(mut self, release: bool) -> Self {
        self.list = self.list.with_release_busy_on_cancel(release);
        self
    }

    /// Initial fetch. Runs once; nothing re-fetches afterwards.
    pub async fn mount(&mut self) {
        self.list.load_all().await;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Rows for the current query.
    pub fn visible(&self) -> Vec<&UserRecord> {
        self.list.filter(&self.query)
    }

    pub fn navigation(&self) -> &Navigation {
        &self.nav
    }

    pub fn detail(&self) -> DetailView {
        DetailView::mount(&self.nav)
    }

    /// Open a row's detail page. Returns false if the id is not in the list.
    pub fn view(&mut self, id: UserId) -> bool {
        match self.list.find(id) {
            Some(user) => {
                self.nav = Navigation::to_user(user);
                true
            }
            None => false,
        }
    }

    /// Navigate by path, with no record attached.
    pub fn navigate(&mut self, path: &str) -> bool {
        match Navigation::to_path(path) {
            Some(nav) => {
                self.nav = nav;
                true
            }
            None => false,
        }
    }

    pub fn open_add(&mut self) {
        self.add_form.open();
    }

    /// Open the edit form on a row. Returns false if the id is not listed.
    pub fn open_edit(&mut self, id: UserId) -> bool {
        match self.list.find(id) {
            Some(user) => {
                let user = user.clone();
                self.edit_form.open(user);
                true
            }
            None => false,
        }
    }

    /// Submit the add form and append the created record.
    pub async fn submit_add(&mut self) -> Result<UserId, FormError> {
        let created = self.add_form.submit(self.service.as_ref()).await?;
        let id = created.id;
        self.list.user_added(created);
        Ok(id)
    }

    /// Submit the edit form, then hand the server's record to the list's
    /// update, which sends it once more and stores that response.
    pub async fn submit_edit(&mut self) -> Result<UserId, FormError> {
        let accepted = self.edit_form.submit(self.service.as_ref()).await?;
        let id = accepted.id;
        self.list.update(accepted).await?;
        Ok(id)
    }

    pub async fn delete(&mut self, id: UserId, confirm: &mut dyn Confirm) -> DeleteOutcome {
        self.list.delete(id, confirm).await
    }
}
