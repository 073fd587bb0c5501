use yew::prelude::*;

use crate::{api::ExpenseApi, components::Dashboard, config::AppConfig, session::Session};

/// Everything the dashboard needs from outside the component tree.
#[derive(Clone, Debug, PartialEq)]
pub struct AppContext {
    pub config: AppConfig,
    pub session: Session,
}

impl AppContext {
    pub fn api(&self) -> ExpenseApi {
        ExpenseApi::new(&self.config, &self.session)
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: AppConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let config = props.config.clone();
    let context = use_state(move || match Session::load() {
        Ok(Some(session)) => {
            log::info!("signed in as {}", session.user.full_name);
            Some(AppContext { config, session })
        }
        Ok(None) => {
            log::info!("no stored session");
            None
        }
        Err(e) => {
            log::error!("{}", e);
            None
        }
    });

    match &*context {
        Some(context) => html! {
            <ContextProvider<AppContext> context={context.clone()}>
                <Dashboard />
            </ContextProvider<AppContext>>
        },
        None => html! {
            <div class="min-h-screen flex items-center justify-center bg-background">
                <div class="bg-card p-8 rounded-[10px] shadow-sm border border-border text-center space-y-4">
                    <h1 class="text-2xl font-bold text-foreground">{"You are signed out"}</h1>
                    <p class="text-sm text-muted-foreground">{"Please sign in to view your expenses."}</p>
                    <a href="/" class="inline-block bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-sm font-bold">{"Go to sign in"}</a>
                </div>
            </div>
        },
    }
}
