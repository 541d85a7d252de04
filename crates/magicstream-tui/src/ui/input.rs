//! Keyboard input handling for the TUI.
//!
//! Events are dispatched by overlay state first, then by route: the form
//! screens (login, register, review editor) own the character keys while
//! they are active, the list screens get the global shortcuts.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use magicstream_core::Route;

use crate::app::{
    can_add_field_char, can_add_password_char, can_add_review_char, App, AppState, Focus,
    LoginFocus, RegisterFocus, PAGE_SCROLL_SIZE,
};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    match app.route.clone() {
        Route::Login => handle_login_input(app, key).await,
        Route::Register => handle_register_input(app, key).await,
        Route::Review(_) => handle_review_input(app, key).await,
        Route::Stream(_) => handle_stream_input(app, key).await,
        Route::Home | Route::Recommended => handle_list_input(app, key).await,
    }
}

async fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Ctrl+N jumps to account creation
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('n') {
        app.navigate(Route::Register);
        return Ok(false);
    }

    match key.code {
        KeyCode::Esc => {
            // Back to the public catalog; the stashed destination is dropped
            app.pending_route = None;
            app.navigate(Route::Home);
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Email => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Remember,
                LoginFocus::Remember => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Email,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Email => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Email,
                LoginFocus::Remember => LoginFocus::Password,
                LoginFocus::Button => LoginFocus::Remember,
            };
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Email => app.login_focus = LoginFocus::Password,
            LoginFocus::Password | LoginFocus::Button => {
                let _ = app.attempt_login().await;
            }
            LoginFocus::Remember => app.login_remember = !app.login_remember,
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Email => {
                app.login_email.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Remember | LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Email => {
                if can_add_field_char(app.login_email.chars().count(), c) {
                    app.login_email.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login_password.chars().count(), c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Remember => {
                if c == ' ' {
                    app.login_remember = !app.login_remember;
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}

async fn handle_register_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.navigate(Route::Login);
        }
        KeyCode::Tab => next_register_focus(app),
        KeyCode::BackTab => prev_register_focus(app),
        KeyCode::Down => {
            if app.register_focus == RegisterFocus::Genres {
                let max = app.genres.len().saturating_sub(1);
                app.register_genre_cursor = (app.register_genre_cursor + 1).min(max);
            } else {
                next_register_focus(app);
            }
        }
        KeyCode::Up => {
            if app.register_focus == RegisterFocus::Genres {
                app.register_genre_cursor = app.register_genre_cursor.saturating_sub(1);
            } else {
                prev_register_focus(app);
            }
        }
        KeyCode::Enter => match app.register_focus {
            RegisterFocus::FirstName => app.register_focus = RegisterFocus::LastName,
            RegisterFocus::LastName => app.register_focus = RegisterFocus::Email,
            RegisterFocus::Email => app.register_focus = RegisterFocus::Password,
            RegisterFocus::Password => app.register_focus = RegisterFocus::Genres,
            RegisterFocus::Genres => app.toggle_register_genre(),
            RegisterFocus::Button => {
                let _ = app.attempt_register().await;
            }
        },
        KeyCode::Backspace => match app.register_focus {
            RegisterFocus::FirstName => {
                app.register_first_name.pop();
            }
            RegisterFocus::LastName => {
                app.register_last_name.pop();
            }
            RegisterFocus::Email => {
                app.register_email.pop();
            }
            RegisterFocus::Password => {
                app.register_password.pop();
            }
            RegisterFocus::Genres | RegisterFocus::Button => {}
        },
        KeyCode::Char(c) => match app.register_focus {
            RegisterFocus::FirstName => {
                if can_add_field_char(app.register_first_name.chars().count(), c) {
                    app.register_first_name.push(c);
                }
            }
            RegisterFocus::LastName => {
                if can_add_field_char(app.register_last_name.chars().count(), c) {
                    app.register_last_name.push(c);
                }
            }
            RegisterFocus::Email => {
                if can_add_field_char(app.register_email.chars().count(), c) {
                    app.register_email.push(c);
                }
            }
            RegisterFocus::Password => {
                if can_add_password_char(app.register_password.chars().count(), c) {
                    app.register_password.push(c);
                }
            }
            RegisterFocus::Genres => {
                if c == ' ' {
                    app.toggle_register_genre();
                }
            }
            RegisterFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}

fn next_register_focus(app: &mut App) {
    app.register_focus = match app.register_focus {
        RegisterFocus::FirstName => RegisterFocus::LastName,
        RegisterFocus::LastName => RegisterFocus::Email,
        RegisterFocus::Email => RegisterFocus::Password,
        RegisterFocus::Password => RegisterFocus::Genres,
        RegisterFocus::Genres => RegisterFocus::Button,
        RegisterFocus::Button => RegisterFocus::FirstName,
    };
}

fn prev_register_focus(app: &mut App) {
    app.register_focus = match app.register_focus {
        RegisterFocus::FirstName => RegisterFocus::Button,
        RegisterFocus::LastName => RegisterFocus::FirstName,
        RegisterFocus::Email => RegisterFocus::LastName,
        RegisterFocus::Password => RegisterFocus::Email,
        RegisterFocus::Genres => RegisterFocus::Password,
        RegisterFocus::Button => RegisterFocus::Genres,
    };
}

async fn handle_review_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // The editor owns the character keys for admins; Ctrl combinations and
    // the navigation keys still work
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
        app.save_review().await;
        return Ok(false);
    }

    match key.code {
        KeyCode::Esc => {
            let back = app.last_list.clone();
            app.navigate(back);
        }
        KeyCode::Backspace if app.is_admin() => {
            app.review_draft.pop();
        }
        KeyCode::Char(c) if app.is_admin() => {
            if can_add_review_char(app.review_draft.chars().count(), c) {
                app.review_draft.push(c);
            }
        }
        // Read-only shortcuts for non-admin viewers
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('r') => app.refresh_current(),
        KeyCode::Enter => {
            if let Route::Review(imdb_id) = app.route.clone() {
                app.navigate(Route::Stream(imdb_id));
            }
        }
        _ => {}
    }
    Ok(false)
}

async fn handle_stream_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            let back = app.last_list.clone();
            app.navigate(back);
        }
        KeyCode::Char('v') => {
            if let Route::Stream(imdb_id) = app.route.clone() {
                app.navigate(Route::Review(imdb_id));
            }
        }
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('r') => app.refresh_current(),
        KeyCode::Char('L') => app.logout().await,
        _ => {}
    }
    Ok(false)
}

async fn handle_list_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    let max_index = match app.route {
        Route::Recommended => app.recommended.len().saturating_sub(1),
        _ => app.movies.len().saturating_sub(1),
    };

    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('L') => app.logout().await,
        KeyCode::Char('r') => app.refresh_current(),
        KeyCode::Char('1') => app.navigate(Route::Home),
        KeyCode::Char('2') => app.navigate(Route::Recommended),
        KeyCode::Char('l') if !app.signed_in() => app.navigate(Route::Login),
        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::List => Focus::Detail,
                Focus::Detail => Focus::List,
            };
        }
        KeyCode::Esc => {
            app.status_message = None;
            app.focus = Focus::List;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            move_selection(app, 1, max_index);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            move_selection(app, -1, max_index);
        }
        KeyCode::PageDown => {
            move_selection(app, PAGE_SCROLL_SIZE as isize, max_index);
        }
        KeyCode::PageUp => {
            move_selection(app, -(PAGE_SCROLL_SIZE as isize), max_index);
        }
        KeyCode::Home => {
            set_selection(app, 0);
        }
        KeyCode::End => {
            set_selection(app, max_index);
        }
        KeyCode::Enter => {
            if let Some(movie) = app.selected_movie() {
                let imdb_id = movie.imdb_id.clone();
                app.navigate(Route::Stream(imdb_id));
            }
        }
        KeyCode::Char('v') => {
            if let Some(movie) = app.selected_movie() {
                let imdb_id = movie.imdb_id.clone();
                app.navigate(Route::Review(imdb_id));
            }
        }
        _ => {}
    }
    Ok(false)
}

fn move_selection(app: &mut App, delta: isize, max_index: usize) {
    let current = match app.route {
        Route::Recommended => app.recommended_selection,
        _ => app.browse_selection,
    };
    let next = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        (current + delta as usize).min(max_index)
    };
    set_selection(app, next);
}

fn set_selection(app: &mut App, index: usize) {
    match app.route {
        Route::Recommended => app.recommended_selection = index,
        _ => app.browse_selection = index,
    }
}
