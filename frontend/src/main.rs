use crate::app::{host_context, App};

mod app;
mod components;
mod rpc;
mod tops_sheet;

fn main() {
    yew::Renderer::<App>::with_props(host_context()).render();
}
