//! Read-only view of a single user, fed by navigation state.

use crate::model::UserRecord;
use crate::routes::Navigation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    Found(UserRecord),
    NotFound,
}

impl DetailView {
    /// Build the view from whatever record came with the navigation. Never
    /// fetches; the id in the path is not consulted.
    pub fn mount(nav: &Navigation) -> Self {
        match &nav.state {
            Some(user) => DetailView::Found(user.clone()),
            None => DetailView::NotFound,
        }
    }

    /// (label, value) pairs in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let DetailView::Found(user) = self else {
            return Vec::new();
        };
        let p = &user.profile;
        vec![
            ("Name", p.name.clone()),
            ("Username", p.username.clone()),
            ("Email", p.email.clone()),
            ("Phone", p.phone.clone()),
            ("Website", p.website.clone()),
            ("Company", p.company.name.clone()),
            ("Address", user.address_line()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ervin, leanne};

    #[test]
    fn test_mount_with_state() {
        let view = DetailView::mount(&Navigation::to_user(&leanne()));
        assert_eq!(view, DetailView::Found(leanne()));

        let rows = view.rows();
        assert_eq!(rows[0], ("Name", "Leanne Graham".to_string()));
        assert_eq!(rows[6], ("Address", "Kulas Light, Gwenborough, 92998-3874".to_string()));
    }

    #[test]
    fn test_mount_without_state_is_not_found() {
        let nav = Navigation::to_path("/users/1").unwrap();
        let view = DetailView::mount(&nav);
        assert_eq!(view, DetailView::NotFound);
        assert!(view.rows().is_empty());
    }

    #[test]
    fn test_attached_record_wins_over_path() {
        let mut nav = Navigation::to_user(&ervin());
        nav.route = crate::routes::Route::UserDetail(1);
        assert_eq!(DetailView::mount(&nav), DetailView::Found(ervin()));
    }
}
