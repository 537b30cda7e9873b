use crate::components::aliases::import::AliasImportView;
use crate::components::locks::resource_lock::ResourceLockPanel;
use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet, YwMaterialTopSheet};
use yew::{html, AttrValue, Component, Context, Html, NodeRef, Properties};

const DEFAULT_IMPORT_URL: &str = "/api/aliases/import";

/// Values the hosting page hands to the editor.
#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    pub import_url: AttrValue,
    pub site_root: AttrValue,
}

/// Reads `data-alias-import-url` and `data-site-root` from `<body>`.
pub fn host_context() -> AppProps {
    let dataset = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .map(|body| body.dataset());
    let read = |key: &str| dataset.as_ref().and_then(|d| d.get(key));

    AppProps {
        import_url: read("aliasImportUrl")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMPORT_URL.to_string())
            .into(),
        site_root: read("siteRoot").unwrap_or_default().into(),
    }
}

pub enum Msg {
    OpenImport,
    CloseImport,
}

pub struct App {
    import_sheet_ref: NodeRef,
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            import_sheet_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::OpenImport => open_top_sheet(self.import_sheet_ref.clone()),
            Msg::CloseImport => close_top_sheet(self.import_sheet_ref.clone()),
        }
        false
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();
        html! {
            <div>
                <div class="toolbar">
                    <button class="icon-btn" title="Import aliases" onclick={link.callback(|_| Msg::OpenImport)}>
                        <i class="material-icons">{"upload_file"}</i>
                        <span class="icon-label">{"Import aliases"}</span>
                    </button>
                </div>
                <ResourceLockPanel />
                <YwMaterialTopSheet node_ref={self.import_sheet_ref.clone()}>
                    <div class="dialog">
                        <button class="dialog-close" onclick={link.callback(|_| Msg::CloseImport)}>{ "✕" }</button>
                        <h2>{"Import aliases"}</h2>
                        <AliasImportView
                            import_url={props.import_url.clone()}
                            site_root={props.site_root.clone()}
                        />
                    </div>
                </YwMaterialTopSheet>
            </div>
        }
    }
}
