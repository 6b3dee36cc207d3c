//! `signup`, `signin`, `signout`, `whoami` and `account`.

use super::open_backend;
use crate::backend::auth::{FederatedIdentity, ProviderId};
use crate::backend::AuthProvider;
use crate::cli::parser::{AccountCmd, Commands};
use crate::config::Config;
use crate::core::Backend;
use crate::core::auth as flows;
use crate::errors::{AppError, AppResult};
use crate::models::profile::UserProfile;
use crate::routes::Route;
use crate::session::SessionContext;
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::confirm;
use crate::utils::colors::{GREEN, GREY, RESET, YELLOW};

fn navigate(cfg: &Config, route: &Route) {
    info(format!(
        "→ {}{} ({})",
        cfg.basename.trim_end_matches('/'),
        route.path(),
        route.title()
    ));
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let local = open_backend(cfg)?;
    let b = Backend::local(&local);

    match cmd {
        Commands::Signup {
            name,
            email,
            password,
        } => {
            let (user, route) = flows::sign_up(&b, name, email, password)?;
            success(format!(
                "Account created for {}",
                user.email.as_deref().unwrap_or(email)
            ));
            info("A verification email has been queued (see `podguard mail --print`).");
            navigate(cfg, &route);
        }

        Commands::Signin {
            email,
            password,
            google,
            name,
            first_name,
            last_name,
            phone,
            address,
            gender,
            dob,
            country,
            forgot,
        } => {
            let email = email.as_deref().unwrap_or_default();

            // the sign-in page always starts from a signed-out state
            flows::visit_sign_in(&b);

            if *forgot {
                let msg = flows::forgot_password(&b, email)?;
                success(msg);
                return Ok(());
            }

            let (user, route) = if *google {
                if email.trim().is_empty() {
                    return Err(AppError::InvalidEmail(email.to_string()));
                }
                let identity = FederatedIdentity {
                    provider: ProviderId::Google,
                    email: email.to_string(),
                    display_name: name.clone(),
                };
                let profile = UserProfile {
                    name: name.clone(),
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    phone: phone.clone(),
                    address: address.clone(),
                    gender: gender.clone(),
                    dob: dob.clone(),
                    country: country.clone(),
                    ..Default::default()
                };
                flows::sign_in_with_federated(&b, &identity, profile)?
            } else {
                flows::sign_in(&b, email, password.as_deref().unwrap_or_default())?
            };

            success(format!(
                "Signed in as {}",
                user.email.as_deref().unwrap_or(&user.uid)
            ));
            navigate(cfg, &route);
        }

        Commands::Signout => {
            let route = flows::sign_out(&b)?;
            success("Signed out.");
            navigate(cfg, &route);
        }

        Commands::Whoami => whoami(&local.auth)?,

        Commands::Account { action } => match action {
            AccountCmd::Password { new_password } => {
                flows::change_password(&b, new_password)?;
                success("Password updated.");
            }
            AccountCmd::Verify { code: None } => {
                flows::send_verification(&b)?;
                success("Verification email sent.");
            }
            AccountCmd::Verify { code: Some(code) } => {
                flows::verify_email(&b, code)?;
                success("Email address verified.");
            }
            AccountCmd::Reset { code, new_password } => {
                flows::confirm_password_reset(&b, code, new_password)?;
                success("Password has been reset. You can sign in now.");
            }
            AccountCmd::Delete { yes } => {
                if local.auth.current_user().is_none() {
                    return Err(AppError::Rejected(
                        crate::core::auth_messages::NO_CURRENT_USER.to_string(),
                    ));
                }
                if !confirm("Delete your account? This cannot be undone.", *yes)? {
                    warning("Account deletion cancelled.");
                    return Ok(());
                }
                let route = flows::delete_account(&b)?;
                success("Account deleted.");
                navigate(cfg, &route);
            }
        },

        _ => {}
    }

    Ok(())
}

/// Print the session as the context resolves it.
fn whoami<A: AuthProvider + ?Sized>(auth: &A) -> AppResult<()> {
    let session = SessionContext::start(auth);
    let state = session.state();

    if let Some(msg) = &state.error_message {
        warning(msg);
    }

    match (&state.current_user, state.logged_in) {
        (Some(user), true) => {
            let verified = if user.email_verified {
                format!("{GREEN}verified{RESET}")
            } else {
                format!("{YELLOW}not verified{RESET}")
            };
            println!("👤 {}", user.email.as_deref().unwrap_or("-"));
            println!("   uid      : {}", user.uid);
            if let Some(name) = &user.display_name {
                println!("   name     : {name}");
            }
            println!("   email    : {verified}");
            println!("   provider : {}", state.provider);
        }
        _ => println!("{GREY}Not signed in.{RESET}"),
    }

    Ok(())
}
