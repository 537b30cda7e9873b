//! Alias import view: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering and helpers.
//!
//! The cycle itself (selection, submission, result classification) lives in
//! `common::exchange::AliasImportExchange`; this component only feeds it the
//! browser events and renders what it holds.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod transport;
mod update;
mod view;

use messages::Msg;
use props::AliasImportProps;

pub use state::AliasImportView;

impl Component for AliasImportView {
    type Message = Msg;
    type Properties = AliasImportProps;

    fn create(ctx: &Context<Self>) -> Self {
        AliasImportView::new(ctx.props())
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props() == old_props {
            return false;
        }
        // Another endpoint or site means another exchange; drop the old cycle.
        *self = AliasImportView::new(ctx.props());
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
