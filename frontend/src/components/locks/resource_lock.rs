use crate::rpc::core_service;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

pub enum Msg {
    UpdateUri(String),
    Lock,
    Unlock,
    Finished(Result<Option<String>, String>),
}

/// Small panel to lock or unlock a resource by uri.
pub struct ResourceLockPanel {
    uri: String,
    pending: bool,
    /// Last answer: `(accepted, text)`.
    status: Option<(bool, String)>,
}

impl ResourceLockPanel {
    fn run(&mut self, ctx: &Context<Self>, locking: bool) {
        let uri = self.uri.trim().to_string();
        let link = ctx.link().clone();
        self.pending = true;
        spawn_local(async move {
            let result = if locking {
                core_service::lock(&uri).await
            } else {
                core_service::unlock(&uri).await
            };
            link.send_message(Msg::Finished(result));
        });
    }
}

impl Component for ResourceLockPanel {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            uri: String::new(),
            pending: false,
            status: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::UpdateUri(uri) => {
                self.uri = uri;
                true
            }
            Msg::Lock => {
                self.run(ctx, true);
                true
            }
            Msg::Unlock => {
                self.run(ctx, false);
                true
            }
            Msg::Finished(result) => {
                self.pending = false;
                self.status = Some(match result {
                    Ok(None) => (true, "Done.".to_string()),
                    Ok(Some(refusal)) => (false, refusal),
                    Err(err) => {
                        gloo_console::error!(format!("Lock request failed: {}", err));
                        (false, err)
                    }
                });
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let disabled = self.pending || self.uri.trim().is_empty();
        html! {
            <div class="resource-lock">
                <input
                    type="text"
                    placeholder="/sites/default/index.html"
                    value={self.uri.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::UpdateUri(input.value())
                    })}
                />
                <button class="icon-btn" {disabled} onclick={link.callback(|_| Msg::Lock)}>{"Lock"}</button>
                <button class="icon-btn" {disabled} onclick={link.callback(|_| Msg::Unlock)}>{"Unlock"}</button>
                {
                    match &self.status {
                        Some((true, text)) => html! { <span class="resource-lock-ok">{ text.clone() }</span> },
                        Some((false, text)) => html! { <span class="resource-lock-error">{ text.clone() }</span> },
                        None => html! {},
                    }
                }
            </div>
        }
    }
}
