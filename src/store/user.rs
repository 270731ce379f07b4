//! Account slice: the local user stub, its profiles and the active profile

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::storage::{get_from_storage, set_to_storage, Storage, ACTIVE_PROFILE_KEY, USER_KEY};
use crate::catalog::{random_avatar_color, MAX_PROFILES};
use crate::models::{MaturityLevel, NewProfile, User, UserProfile};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    pub user: Option<User>,
    pub active_profile: Option<UserProfile>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    InitializeUser,
    SignUp {
        email: String,
        name: String,
        password: String,
    },
    SignIn {
        email: String,
        password: String,
    },
    SignOut,
    SetActiveProfile(String),
    AddProfile(NewProfile),
    UpdateProfile(UserProfile),
    DeleteProfile(String),
    SetLoading(bool),
}

/// Why a login form was rejected before dispatching
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please enter your email")]
    MissingEmail,
    #[error("Please enter your name")]
    MissingName,
    #[error("No account found. Please sign up first.")]
    NoAccount,
    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// Validate a sign-up form
pub fn check_sign_up(email: &str, name: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() {
        return Err(AuthError::MissingEmail);
    }
    if name.trim().is_empty() {
        return Err(AuthError::MissingName);
    }
    Ok(())
}

/// Check a sign-in email against the stored account
pub fn check_sign_in(storage: &dyn Storage, email: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() {
        return Err(AuthError::MissingEmail);
    }
    let saved: Option<User> = get_from_storage(storage, USER_KEY, None);
    match saved {
        None => Err(AuthError::NoAccount),
        Some(user) if user.email != email => Err(AuthError::InvalidCredentials),
        Some(_) => Ok(()),
    }
}

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

impl UserState {
    /// Apply an action. Returns false when the action was refused or had no effect.
    pub fn reduce(&mut self, action: UserAction, storage: &dyn Storage) -> bool {
        match action {
            UserAction::InitializeUser => {
                let saved: Option<User> = get_from_storage(storage, USER_KEY, None);
                let active_id: Option<String> = get_from_storage(storage, ACTIVE_PROFILE_KEY, None);
                match saved {
                    Some(user) => {
                        self.active_profile = active_id
                            .and_then(|id| user.profile(&id).cloned());
                        self.user = Some(user);
                        self.is_authenticated = true;
                        debug!(profile = ?self.active_profile.as_ref().map(|p| &p.name), "user restored");
                        true
                    }
                    None => false,
                }
            }

            // The password is accepted and never stored
            UserAction::SignUp { email, name, .. } => {
                let profile = UserProfile {
                    id: generate_id(),
                    name: name.clone(),
                    avatar: random_avatar_color().to_string(),
                    is_kids: false,
                    maturity_level: MaturityLevel::R,
                };
                let user = User {
                    id: generate_id(),
                    email,
                    name,
                    profiles: vec![profile.clone()],
                    active_profile_id: Some(profile.id.clone()),
                    created_at: Utc::now(),
                };

                set_to_storage(storage, USER_KEY, &user);
                set_to_storage(storage, ACTIVE_PROFILE_KEY, &profile.id);
                info!(email = %user.email, "signed up");

                self.user = Some(user);
                self.active_profile = Some(profile);
                self.is_authenticated = true;
                true
            }

            UserAction::SignIn { email, .. } => {
                let saved: Option<User> = get_from_storage(storage, USER_KEY, None);
                let Some(user) = saved.filter(|u| u.email == email) else {
                    return false;
                };
                let active_id: Option<String> = get_from_storage(storage, ACTIVE_PROFILE_KEY, None);
                self.active_profile = active_id
                    .and_then(|id| user.profile(&id).cloned())
                    .or_else(|| user.profiles.first().cloned());
                self.user = Some(user);
                self.is_authenticated = true;
                info!(email = %email, "signed in");
                true
            }

            UserAction::SignOut => {
                self.user = None;
                self.active_profile = None;
                self.is_authenticated = false;
                // The account document stays; only the active profile is cleared
                set_to_storage(storage, ACTIVE_PROFILE_KEY, &None::<String>);
                info!("signed out");
                true
            }

            UserAction::SetActiveProfile(id) => {
                let Some(user) = self.user.as_mut() else {
                    return false;
                };
                let Some(profile) = user.profile(&id).cloned() else {
                    return false;
                };
                user.active_profile_id = Some(profile.id.clone());
                set_to_storage(storage, USER_KEY, &*user);
                set_to_storage(storage, ACTIVE_PROFILE_KEY, &profile.id);
                self.active_profile = Some(profile);
                true
            }

            UserAction::AddProfile(new) => {
                let Some(user) = self.user.as_mut() else {
                    return false;
                };
                if user.profiles.len() >= MAX_PROFILES {
                    return false;
                }
                user.profiles.push(UserProfile {
                    id: generate_id(),
                    name: new.name,
                    avatar: new.avatar,
                    is_kids: new.is_kids,
                    maturity_level: new.maturity_level,
                });
                set_to_storage(storage, USER_KEY, &*user);
                true
            }

            UserAction::UpdateProfile(profile) => {
                let Some(user) = self.user.as_mut() else {
                    return false;
                };
                let Some(slot) = user.profiles.iter_mut().find(|p| p.id == profile.id) else {
                    return false;
                };
                *slot = profile.clone();
                if self.active_profile.as_ref().map(|p| &p.id) == Some(&profile.id) {
                    self.active_profile = Some(profile);
                }
                set_to_storage(storage, USER_KEY, &*user);
                true
            }

            UserAction::DeleteProfile(id) => {
                let Some(user) = self.user.as_mut() else {
                    return false;
                };
                if user.profiles.len() <= 1 || user.profile(&id).is_none() {
                    return false;
                }
                user.profiles.retain(|p| p.id != id);

                if self.active_profile.as_ref().map(|p| &p.id) == Some(&id) {
                    let first = user.profiles.first().cloned();
                    user.active_profile_id = first.as_ref().map(|p| p.id.clone());
                    if let Some(first) = &first {
                        set_to_storage(storage, ACTIVE_PROFILE_KEY, &first.id);
                    }
                    self.active_profile = first;
                }
                set_to_storage(storage, USER_KEY, &*user);
                true
            }

            UserAction::SetLoading(loading) => {
                self.is_loading = loading;
                true
            }
        }
    }

    /// Profiles of the signed-in user
    pub fn profiles(&self) -> &[UserProfile] {
        self.user.as_ref().map(|u| u.profiles.as_slice()).unwrap_or(&[])
    }

    pub fn is_kids_mode(&self) -> bool {
        self.active_profile.as_ref().is_some_and(|p| p.is_kids)
    }

    pub fn can_add_profile(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.profiles.len() < MAX_PROFILES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::storage::MemoryStorage;

    #[test]
    fn test_check_sign_in() {
        let storage = MemoryStorage::new();
        assert_eq!(check_sign_in(&storage, "a@b.c"), Err(AuthError::NoAccount));

        signed_up(&storage);
        assert_eq!(
            check_sign_in(&storage, "other@b.c"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(check_sign_in(&storage, ""), Err(AuthError::MissingEmail));
    }

    #[test]
    fn test_check_sign_up() {
        assert_eq!(check_sign_up("a@b.c", "  "), Err(AuthError::MissingName));
        assert!(check_sign_up("a@b.c", "Sam").is_ok());
    }

    fn signed_up(storage: &MemoryStorage) -> UserState {
        let mut state = UserState::default();
        state.reduce(
            UserAction::SignUp {
                email: "a@b.c".into(),
                name: "Alex".into(),
                password: "secret".into(),
            },
            storage,
        );
        state
    }

    fn kids_profile(name: &str) -> NewProfile {
        NewProfile {
            name: name.into(),
            avatar: "#46D369".into(),
            is_kids: true,
            maturity_level: MaturityLevel::All,
        }
    }

    #[test]
    fn test_sign_up_creates_default_profile() {
        let storage = MemoryStorage::new();
        let state = signed_up(&storage);

        assert!(state.is_authenticated);
        let user = state.user.as_ref().unwrap();
        assert_eq!(user.profiles.len(), 1);
        let profile = &user.profiles[0];
        assert_eq!(profile.name, "Alex");
        assert!(!profile.is_kids);
        assert_eq!(profile.maturity_level, MaturityLevel::R);
        assert_eq!(state.active_profile.as_ref(), Some(profile));
        assert_eq!(user.active_profile_id.as_ref(), Some(&profile.id));

        let stored: Option<String> = get_from_storage(&storage, ACTIVE_PROFILE_KEY, None);
        assert_eq!(stored, Some(profile.id.clone()));
    }

    #[test]
    fn test_sign_in_requires_matching_email() {
        let storage = MemoryStorage::new();
        signed_up(&storage);

        let mut fresh = UserState::default();
        assert!(!fresh.reduce(
            UserAction::SignIn {
                email: "other@b.c".into(),
                password: String::new(),
            },
            &storage,
        ));
        assert!(!fresh.is_authenticated);

        assert!(fresh.reduce(
            UserAction::SignIn {
                email: "a@b.c".into(),
                password: String::new(),
            },
            &storage,
        ));
        assert!(fresh.is_authenticated);
        assert!(fresh.active_profile.is_some());
    }

    #[test]
    fn test_sign_out_keeps_user_document() {
        let storage = MemoryStorage::new();
        let mut state = signed_up(&storage);
        state.reduce(UserAction::SignOut, &storage);

        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        let stored: Option<User> = get_from_storage(&storage, USER_KEY, None);
        assert!(stored.is_some());
        assert_eq!(storage.read(ACTIVE_PROFILE_KEY).unwrap().as_deref(), Some("null"));

        // Sign in again falls back to the first profile
        state.reduce(
            UserAction::SignIn {
                email: "a@b.c".into(),
                password: String::new(),
            },
            &storage,
        );
        assert_eq!(
            state.active_profile.as_ref().map(|p| p.name.as_str()),
            Some("Alex")
        );
    }

    #[test]
    fn test_profile_limit() {
        let storage = MemoryStorage::new();
        let mut state = signed_up(&storage);
        for i in 0..4 {
            assert!(state.reduce(UserAction::AddProfile(kids_profile(&format!("Kid {}", i))), &storage));
        }
        assert!(!state.can_add_profile());
        assert!(!state.reduce(UserAction::AddProfile(kids_profile("Extra")), &storage));
        assert_eq!(state.profiles().len(), 5);
    }

    #[test]
    fn test_delete_active_profile_promotes_first() {
        let storage = MemoryStorage::new();
        let mut state = signed_up(&storage);
        state.reduce(UserAction::AddProfile(kids_profile("Kid")), &storage);
        let kid_id = state.profiles()[1].id.clone();
        state.reduce(UserAction::SetActiveProfile(kid_id.clone()), &storage);
        assert!(state.is_kids_mode());

        assert!(state.reduce(UserAction::DeleteProfile(kid_id), &storage));
        let first = state.profiles()[0].clone();
        assert_eq!(state.active_profile.as_ref(), Some(&first));

        let stored: Option<String> = get_from_storage(&storage, ACTIVE_PROFILE_KEY, None);
        assert_eq!(stored, Some(first.id.clone()));

        // Last profile cannot be deleted
        assert!(!state.reduce(UserAction::DeleteProfile(first.id), &storage));
        assert_eq!(state.profiles().len(), 1);
    }

    #[test]
    fn test_update_profile_refreshes_active() {
        let storage = MemoryStorage::new();
        let mut state = signed_up(&storage);
        let mut profile = state.active_profile.clone().unwrap();
        profile.name = "Renamed".into();
        assert!(state.reduce(UserAction::UpdateProfile(profile), &storage));
        assert_eq!(state.active_profile.as_ref().unwrap().name, "Renamed");

        let stored: Option<User> = get_from_storage(&storage, USER_KEY, None);
        assert_eq!(stored.unwrap().profiles[0].name, "Renamed");
    }

    #[test]
    fn test_set_active_profile_ignores_unknown_id() {
        let storage = MemoryStorage::new();
        let mut state = signed_up(&storage);
        let before = state.clone();
        assert!(!state.reduce(UserAction::SetActiveProfile("missing".into()), &storage));
        assert_eq!(state, before);
    }

    #[test]
    fn test_initialize_restores_session() {
        let storage = MemoryStorage::new();
        let original = signed_up(&storage);

        let mut restored = UserState::default();
        restored.reduce(UserAction::InitializeUser, &storage);
        assert!(restored.is_authenticated);
        assert_eq!(restored.active_profile, original.active_profile);
    }
}
