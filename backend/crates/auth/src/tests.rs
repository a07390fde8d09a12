//! Use-case and router tests for the accounts context

#[cfg(test)]
mod lifecycle_tests {
    use std::sync::Arc;

    use crate::application::{
        AdminUpdateInput, AdminUsersUseCase, AuthConfig, LoginInput, LoginUseCase, RegisterInput,
        RegisterUseCase, UpdateProfileInput, UpdateProfileUseCase,
    };
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};
    use crate::error::AuthError;
    use crate::infra::MemoryUserRepository;
    use crate::models::User;

    struct Fixture {
        repo: Arc<MemoryUserRepository>,
        config: Arc<AuthConfig>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                repo: Arc::new(MemoryUserRepository::new()),
                config: Arc::new(AuthConfig::development()),
            }
        }

        async fn register(&self, email: &str, password: &str) -> User {
            RegisterUseCase::new(self.repo.clone(), self.config.clone())
                .execute(RegisterInput {
                    name: "Test User".into(),
                    email: email.into(),
                    password: password.into(),
                    department: "Ops".into(),
                })
                .await
                .unwrap()
        }

        async fn login(&self, email: &str, password: &str) -> Result<crate::application::LoginOutput, AuthError> {
            LoginUseCase::new(
                self.repo.clone(),
                Arc::new(self.config.token_service()),
                self.config.clone(),
            )
            .execute(LoginInput {
                email: email.into(),
                password: password.into(),
            })
            .await
        }

        async fn admin(&self, email: &str) -> User {
            let user = self.register(email, "admin-password-1").await;
            self.repo
                .set_role_by_email(&user.email, UserRole::Admin)
                .await
                .unwrap();
            self.repo.find_by_id(user.id).await.unwrap().unwrap()
        }
    }

    #[tokio::test]
    async fn test_register_sets_defaults() {
        let fx = Fixture::new();
        let user = fx.register("alice@example.com", "password-123").await;

        assert_eq!(user.id.get(), 1);
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.created_at, user.last_login);
        assert_ne!(user.password_hash.as_phc_string(), "password-123");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let fx = Fixture::new();
        fx.register("alice@example.com", "password-123").await;

        let result = RegisterUseCase::new(fx.repo.clone(), fx.config.clone())
            .execute(RegisterInput {
                name: "Again".into(),
                email: "alice@example.com".into(),
                password: "password-456".into(),
                department: String::new(),
            })
            .await;
        assert!(matches!(result, Err(AuthError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password() {
        let fx = Fixture::new();
        let result = RegisterUseCase::new(fx.repo.clone(), fx.config.clone())
            .execute(RegisterInput {
                name: "Bob".into(),
                email: "bob@example.com".into(),
                password: "short".into(),
                department: String::new(),
            })
            .await;
        assert!(matches!(result, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let fx = Fixture::new();
        let user = fx.register("alice@example.com", "password-123").await;

        let output = fx.login("alice@example.com", "password-123").await.unwrap();
        assert_eq!(output.user.id, user.id);

        let claims = fx.config.token_service().verify(&output.token.token).unwrap();
        assert_eq!(claims.subject, user.id.as_subject());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let fx = Fixture::new();
        fx.register("alice@example.com", "password-123").await;

        let wrong_password = fx.login("alice@example.com", "password-999").await.unwrap_err();
        let unknown_email = fx.login("nobody@example.com", "password-123").await.unwrap_err();
        let case_differs = fx.login("Alice@example.com", "password-123").await.unwrap_err();

        for err in [&wrong_password, &unknown_email, &case_differs] {
            assert!(matches!(err, AuthError::InvalidCredentials));
        }
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert_eq!(
            wrong_password.to_app_error().status_code(),
            unknown_email.to_app_error().status_code()
        );
    }

    #[tokio::test]
    async fn test_profile_role_change_requires_admin() {
        let fx = Fixture::new();
        let user = fx.register("alice@example.com", "password-123").await;
        let use_case = UpdateProfileUseCase::new(fx.repo.clone(), fx.config.clone());

        let result = use_case
            .execute(
                user.clone(),
                UpdateProfileInput {
                    role: Some("admin".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::ForbiddenRoleChange)));

        let stored = fx.repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_profile_admin_may_change_own_role() {
        let fx = Fixture::new();
        let admin = fx.admin("root@example.com").await;
        let use_case = UpdateProfileUseCase::new(fx.repo.clone(), fx.config.clone());

        let updated = use_case
            .execute(
                admin,
                UpdateProfileInput {
                    role: Some("user".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_profile_password_mismatch() {
        let fx = Fixture::new();
        let user = fx.register("alice@example.com", "password-123").await;
        let use_case = UpdateProfileUseCase::new(fx.repo.clone(), fx.config.clone());

        let result = use_case
            .execute(
                user,
                UpdateProfileInput {
                    password: Some("new-password-1".into()),
                    password_confirm: Some("new-password-2".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::PasswordMismatch)));
    }

    #[tokio::test]
    async fn test_profile_password_change_takes_effect() {
        let fx = Fixture::new();
        let user = fx.register("alice@example.com", "password-123").await;
        let use_case = UpdateProfileUseCase::new(fx.repo.clone(), fx.config.clone());

        use_case
            .execute(
                user,
                UpdateProfileInput {
                    name: Some("Alice B".into()),
                    password: Some("new-password-1".into()),
                    password_confirm: Some("new-password-1".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(fx.login("alice@example.com", "password-123").await.is_err());
        let output = fx.login("alice@example.com", "new-password-1").await.unwrap();
        assert_eq!(output.user.name, "Alice B");
    }

    #[tokio::test]
    async fn test_admin_cannot_delete_self() {
        let fx = Fixture::new();
        let admin = fx.admin("root@example.com").await;
        let use_case = AdminUsersUseCase::new(fx.repo.clone(), fx.config.clone());

        let result = use_case.delete(&admin, admin.id).await;
        assert!(matches!(result, Err(AuthError::SelfDeleteForbidden)));
        assert!(fx.repo.find_by_id(admin.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_admin_delete_missing_user() {
        let fx = Fixture::new();
        let admin = fx.admin("root@example.com").await;
        let use_case = AdminUsersUseCase::new(fx.repo.clone(), fx.config.clone());

        let result = use_case.delete(&admin, UserId::from_raw(99)).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_admin_update_email_conflict() {
        let fx = Fixture::new();
        let admin = fx.admin("root@example.com").await;
        let target = fx.register("alice@example.com", "password-123").await;
        let use_case = AdminUsersUseCase::new(fx.repo.clone(), fx.config.clone());

        let result = use_case
            .update(
                &admin,
                target.id,
                AdminUpdateInput {
                    email: Some("root@example.com".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::EmailConflict)));

        // Keeping one's own email is not a conflict
        let updated = use_case
            .update(
                &admin,
                target.id,
                AdminUpdateInput {
                    email: Some("alice@example.com".into()),
                    role: Some("admin".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_admin_update_without_fields() {
        let fx = Fixture::new();
        let admin = fx.admin("root@example.com").await;
        let target = fx.register("alice@example.com", "password-123").await;
        let use_case = AdminUsersUseCase::new(fx.repo.clone(), fx.config.clone());

        let result = use_case
            .update(&admin, target.id, AdminUpdateInput::default())
            .await;
        assert!(matches!(result, Err(AuthError::NoChangesApplied)));

        let result = use_case
            .update(
                &admin,
                UserId::from_raw(42),
                AdminUpdateInput {
                    name: Some("Ghost".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_admin_set_role() {
        let fx = Fixture::new();
        let admin = fx.admin("root@example.com").await;
        fx.register("alice@example.com", "password-123").await;
        let use_case = AdminUsersUseCase::new(fx.repo.clone(), fx.config.clone());

        let user = use_case
            .set_role(&admin, "alice@example.com", "admin")
            .await
            .unwrap();
        assert!(user.is_admin());

        assert!(matches!(
            use_case.set_role(&admin, "alice@example.com", "owner").await,
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            use_case.set_role(&admin, "ghost@example.com", "user").await,
            Err(AuthError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_bootstrap_promotion() {
        let fx = Fixture::new();
        let user = fx.register("alice@example.com", "password-123").await;

        assert!(crate::application::promote_admin(fx.repo.as_ref(), "alice@example.com")
            .await
            .unwrap());
        assert!(!crate::application::promote_admin(fx.repo.as_ref(), "ghost@example.com")
            .await
            .unwrap());

        let email = Email::new("alice@example.com").unwrap();
        let stored = fx.repo.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(stored.id, user.id);
        assert!(stored.is_admin());
    }
}

#[cfg(test)]
mod guard_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use platform::token::TokenService;

    use crate::application::{AuthGuard, Identity};
    use crate::domain::entity::user::NewUser;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{email::Email, user_role::UserRole};
    use crate::infra::MemoryUserRepository;
    use crate::models::User;
    use platform::password::HashedPassword;

    const SECRET: &[u8] = b"guard-test-secret";

    async fn seed(repo: &MemoryUserRepository, email: &str, role: UserRole) -> User {
        repo.create(NewUser::new(
            "Seeded".into(),
            Email::new(email).unwrap(),
            HashedPassword::from_stored("$argon2id$stub"),
            role,
            String::new(),
        ))
        .await
        .unwrap()
    }

    fn guard(repo: &Arc<MemoryUserRepository>) -> (AuthGuard<MemoryUserRepository>, TokenService) {
        let tokens = TokenService::new(SECRET, Duration::from_secs(3600));
        (
            AuthGuard::new(repo.clone(), Arc::new(tokens.clone())),
            tokens,
        )
    }

    #[tokio::test]
    async fn test_identity_from_valid_token() {
        let repo = Arc::new(MemoryUserRepository::new());
        let user = seed(&repo, "a@example.com", UserRole::User).await;
        let (guard, tokens) = guard(&repo);

        let token = tokens.issue(user.id.as_subject()).unwrap().token;
        assert_eq!(guard.current_identity(Some(&token)), Identity::User(user.id));
    }

    #[tokio::test]
    async fn test_identity_anonymous_on_failures() {
        let repo = Arc::new(MemoryUserRepository::new());
        let (guard, tokens) = guard(&repo);

        assert_eq!(guard.current_identity(None), Identity::Anonymous);
        assert_eq!(guard.current_identity(Some("garbage")), Identity::Anonymous);

        // Subject 0 is the "no identity" sentinel
        let token = tokens.issue(0).unwrap().token;
        assert_eq!(guard.current_identity(Some(&token)), Identity::Anonymous);
    }

    #[tokio::test]
    async fn test_is_admin_false_cases() {
        let repo = Arc::new(MemoryUserRepository::new());
        let user = seed(&repo, "user@example.com", UserRole::User).await;
        let admin = seed(&repo, "admin@example.com", UserRole::Admin).await;
        let (guard, tokens) = guard(&repo);

        // no token
        assert!(!guard.is_admin(None).await);
        // malformed token
        assert!(!guard.is_admin(Some("a.b.c")).await);
        // token signed with another key
        let foreign = TokenService::new(b"other-key", Duration::from_secs(60))
            .issue(admin.id.as_subject())
            .unwrap()
            .token;
        assert!(!guard.is_admin(Some(&foreign)).await);
        // non-admin user
        let user_token = tokens.issue(user.id.as_subject()).unwrap().token;
        assert!(!guard.is_admin(Some(&user_token)).await);
        // admin
        let admin_token = tokens.issue(admin.id.as_subject()).unwrap().token;
        assert!(guard.is_admin(Some(&admin_token)).await);
        // deleted admin
        repo.delete(admin.id).await.unwrap();
        assert!(!guard.is_admin(Some(&admin_token)).await);
    }

    #[tokio::test]
    async fn test_is_admin_false_for_expired_token() {
        let repo = Arc::new(MemoryUserRepository::new());
        let admin = seed(&repo, "admin@example.com", UserRole::Admin).await;
        let guard = AuthGuard::new(
            repo.clone(),
            Arc::new(TokenService::new(SECRET, Duration::from_secs(3600))),
        );

        let short = TokenService::new(SECRET, Duration::ZERO);
        let token = short.issue(admin.id.as_subject()).unwrap().token;
        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert!(!guard.is_admin(Some(&token)).await);
        assert!(guard.require_admin(Some(&token)).await.is_err());
    }

    #[tokio::test]
    async fn test_require_user_missing_record() {
        let repo = Arc::new(MemoryUserRepository::new());
        let (guard, tokens) = guard(&repo);

        let token = tokens.issue(77).unwrap().token;
        assert!(matches!(
            guard.require_user(Some(&token)).await,
            Err(crate::AuthError::UserNotFound)
        ));
        assert!(matches!(
            guard.require_user(None).await,
            Err(crate::AuthError::Unauthenticated)
        ));
    }
}

#[cfg(test)]
mod router_tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::application::AuthConfig;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{email::Email, user_role::UserRole};
    use crate::infra::MemoryUserRepository;
    use crate::presentation::{AuthAppState, auth_router};

    fn app() -> (Router, AuthAppState<MemoryUserRepository>) {
        let state = AuthAppState::new(MemoryUserRepository::new(), AuthConfig::development());
        (auth_router(state.clone()), state)
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Register and log in, returning the `jwt=...` cookie pair
    async fn signed_in(app: &Router, email: &str) -> String {
        let resp = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/register",
                serde_json::json!({
                    "name": "Tester",
                    "email": email,
                    "password": "password-123",
                    "department": "QA"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/login",
                serde_json::json!({ "email": email, "password": "password-123" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::ACCEPTED);

        let set_cookie = resp
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("Path=/"));

        let body = body_json(resp).await;
        assert_eq!(body["user"]["email"], email);
        assert!(body["user"].get("password_hash").is_none());

        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_current_user_requires_token() {
        let (app, _) = app();
        let resp = app
            .oneshot(Request::get("/user").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_then_current_user() {
        let (app, _) = app();
        let cookie = signed_in(&app, "alice@example.com").await;

        let resp = app
            .oneshot(
                Request::get("/user")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["email"], "alice@example.com");
        assert_eq!(body["role"], "user");
        assert_eq!(body["department"], "QA");
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_bad_login_problem_details() {
        let (app, _) = app();
        let resp = app
            .oneshot(json_request(
                "POST",
                "/login",
                serde_json::json!({ "email": "ghost@example.com", "password": "whatever-1" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(resp).await;
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert_eq!(body["detail"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let (app, _) = app();
        let resp = app
            .oneshot(Request::post("/logout").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::ACCEPTED);

        let set_cookie = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(set_cookie.starts_with("jwt=;"));
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_admin_routes_refuse_non_admin() {
        let (app, _) = app();
        let cookie = signed_in(&app, "alice@example.com").await;

        let resp = app
            .clone()
            .oneshot(
                Request::get("/admin/users")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = app
            .oneshot(Request::get("/admin/users").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_lists_and_cannot_self_delete() {
        let (app, state) = app();
        let cookie = signed_in(&app, "root@example.com").await;
        let email = Email::new("root@example.com").unwrap();
        state
            .repo
            .set_role_by_email(&email, UserRole::Admin)
            .await
            .unwrap();

        let resp = app
            .clone()
            .oneshot(
                Request::get("/admin/users")
                    .header(header::COOKIE, cookie.clone())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        let own_id = body[0]["id"].as_i64().unwrap();

        let resp = app
            .oneshot(
                Request::delete(format!("/admin/users/{own_id}"))
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
