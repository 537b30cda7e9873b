//! Rendering of the alias import view: the upload form, validation and
//! failure messages, and the classified result list.

use common::exchange::ImportPhase;
use common::model::display::ClassifiedRow;
use common::requests::PARAM_IMPORTFILE;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use super::helpers::take_files;
use super::messages::Msg;
use super::state::AliasImportView;

pub fn view(component: &AliasImportView, ctx: &Context<AliasImportView>) -> Html {
    let link = ctx.link();
    let Some(exchange) = &component.exchange else {
        return html! {
            <div class="alias-import alias-import-error">
                { component.config_error.clone().unwrap_or_default() }
            </div>
        };
    };

    let path_label = if component.reading {
        "Reading file...".to_string()
    } else {
        exchange
            .selected_file_name()
            .unwrap_or("No file selected")
            .to_string()
    };

    html! {
        <div class="alias-import">
            { build_form(component, link, path_label) }
            { build_messages(component) }
            {
                if exchange.phase() == ImportPhase::Submitted {
                    html! { <div class="alias-import-pending">{"Importing aliases..."}</div> }
                } else {
                    html! {}
                }
            }
            <div class="alias-import-results">
                { for exchange.results().entries().iter().map(build_row) }
            </div>
        </div>
    }
}

fn build_form(component: &AliasImportView, link: &Scope<AliasImportView>, path_label: String) -> Html {
    html! {
        <div class="alias-import-form">
            <input
                type="file"
                accept=".csv,text/csv"
                name={PARAM_IMPORTFILE}
                ref={component.file_input_ref.clone()}
                style="display:none;"
                onchange={link.callback(|e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::FilesChosen(take_files(&input))
                })}
            />
            <button class="icon-btn" onclick={link.callback(|_| Msg::OpenFileDialog)}>
                {"Select file"}
            </button>
            <span class="alias-import-path">{ path_label }</span>
            <button
                class="icon-btn"
                disabled={!component.can_submit()}
                onclick={link.callback(|_| Msg::Submit)}
            >
                {"Import"}
            </button>
        </div>
    }
}

fn build_messages(component: &AliasImportView) -> Html {
    html! {
        <>
            { for component.validation_errors.iter().map(|message| html! {
                <div class="alias-import-validation">{ message.clone() }</div>
            }) }
            {
                if let Some(failure) = &component.failure {
                    html! { <div class="alias-import-failure">{ failure.clone() }</div> }
                } else {
                    html! {}
                }
            }
        </>
    }
}

fn build_row(entry: &ClassifiedRow) -> Html {
    html! {
        <div class={classes!("alias-import-row", entry.class.css_class())}>
            <span class="alias-import-line">{ entry.row.line }</span>
            <span class="alias-import-message">{ entry.row.message.clone() }</span>
        </div>
    }
}
