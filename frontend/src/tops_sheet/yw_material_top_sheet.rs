use gloo_timers::callback::Timeout;
use yew::{html, Component, Context, Html, NodeRef, Properties};

/// Sliding sheet used to host dialogs such as the alias import.
///
/// The sheet is hidden until `open_top_sheet` adds the `show` class.
pub struct YwMaterialTopSheet;

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
}

impl Component for YwMaterialTopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="top-sheet" ref={ctx.props().node_ref.clone()}>
                { ctx.props().children.clone() }
            </div>
        }
    }
}

const SHOW_CLASS: &str = "show";

pub fn open_top_sheet(top_sheet_ref: NodeRef) {
    toggle_later(top_sheet_ref, true);
}

pub fn close_top_sheet(top_sheet_ref: NodeRef) {
    toggle_later(top_sheet_ref, false);
}

/// Flips the `show` class on the next frames so the CSS transition runs.
fn toggle_later(top_sheet_ref: NodeRef, show: bool) {
    if let Some(sheet) = top_sheet_ref.cast::<web_sys::Element>() {
        Timeout::new(50, move || {
            let classes = sheet.class_list();
            let _ = if show {
                classes.add_1(SHOW_CLASS)
            } else {
                classes.remove_1(SHOW_CLASS)
            };
        })
        .forget();
    }
}
