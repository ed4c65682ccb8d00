//! Built-in UI string catalogs.

use crate::{
    dto::i18n::{
        ChatStrings, CommonStrings, ErrorStrings, HomeStrings, HomeTabStrings, ImportStrings,
        PanelStrings, SpecPanelStrings, TabStrings, UiStrings,
    },
    state::language::Language,
};

/// Return the catalog for the requested language.
pub fn catalog(language: Language) -> UiStrings {
    match language {
        Language::Zh => chinese(),
        Language::En => english(),
    }
}

/// Localized chat confirmation shown after a successful turn.
pub fn turn_success_message(language: Language) -> &'static str {
    match language {
        Language::Zh => {
            "我已经根据您的要求更新了 API 规范。您可以在左侧编辑器中查看更改。您是否需要进行其他调整？"
        }
        Language::En => {
            "I have updated the API specification based on your requirements. You can view the changes in the editor on the left. Would you like to make any additional adjustments?"
        }
    }
}

/// Localized chat notice shown after a failed turn.
pub fn turn_error_message(language: Language) -> &'static str {
    match language {
        Language::Zh => "抱歉，更新 API 规范时遇到错误。请重试。",
        Language::En => {
            "Sorry, I encountered an error while updating the API specification. Please try again."
        }
    }
}

fn chinese() -> UiStrings {
    let language = Language::Zh;
    UiStrings {
        common: CommonStrings {
            error: "错误".into(),
            loading: "加载中...".into(),
            clear: "全部清除".into(),
            clear_confirm: "确定要清除所有内容吗？".into(),
            download: "下载".into(),
            title: "APITalk - AI 驱动的 API 设计工具".into(),
            import: "导入".into(),
        },
        home: HomeStrings {
            title: "API 设计器".into(),
            description: "使用自然语言生成 OpenAPI 规范".into(),
            tabs: HomeTabStrings {
                docs: "交互文档".into(),
                yaml: "YAML".into(),
            },
        },
        api_viewer: PanelStrings {
            title: "API 文档".into(),
            placeholder: "输入您的 API 需求以查看交互式文档。".into(),
        },
        api_spec: SpecPanelStrings {
            title: "API 规范".into(),
            placeholder: "输入您的 API 需求以查看规范。".into(),
            copy: "复制".into(),
            copied: "已复制".into(),
            download: "下载".into(),
        },
        import: ImportStrings {
            title: "导入 OpenAPI 规范".into(),
            or: "导入已有的 OpenAPI 规范".into(),
            description: "拖放您的 YAML 文件到此处或点击选择".into(),
            error: "导入文件失败".into(),
        },
        chat: ChatStrings {
            title: "对话".into(),
            placeholder: "输入你的需求，让我帮你生成 API 规范".into(),
            success: turn_success_message(language).into(),
            error: turn_error_message(language).into(),
            send: "发送".into(),
        },
        tabs: TabStrings {
            spec: "YAML 文档".into(),
            docs: "交互文档".into(),
        },
        error: ErrorStrings {
            title: "错误".into(),
            retry: "重试".into(),
        },
    }
}

fn english() -> UiStrings {
    let language = Language::En;
    UiStrings {
        common: CommonStrings {
            error: "Error".into(),
            loading: "Loading...".into(),
            clear: "Clear All".into(),
            clear_confirm: "Are you sure you want to clear all content?".into(),
            download: "Download".into(),
            title: "APITalk - AI-Powered API Designer".into(),
            import: "Import".into(),
        },
        home: HomeStrings {
            title: "API Designer".into(),
            description: "Generate OpenAPI specifications using natural language".into(),
            tabs: HomeTabStrings {
                docs: "Interactive Docs".into(),
                yaml: "YAML".into(),
            },
        },
        api_viewer: PanelStrings {
            title: "API Documentation".into(),
            placeholder: "Enter your API requirements to view interactive documentation.".into(),
        },
        api_spec: SpecPanelStrings {
            title: "API Specification".into(),
            placeholder: "Enter your API requirements to view the specification.".into(),
            copy: "Copy".into(),
            copied: "Copied".into(),
            download: "Download".into(),
        },
        import: ImportStrings {
            title: "Import OpenAPI Specification".into(),
            or: "Import existing OpenAPI specification".into(),
            description: "Drop your YAML file here or click to select".into(),
            error: "Failed to import file".into(),
        },
        chat: ChatStrings {
            title: "Chat".into(),
            placeholder: "Enter your requirements and I'll help generate API specifications"
                .into(),
            success: turn_success_message(language).into(),
            error: turn_error_message(language).into(),
            send: "Send".into(),
        },
        tabs: TabStrings {
            spec: "YAML Documentation".into(),
            docs: "Interactive Documentation".into(),
        },
        error: ErrorStrings {
            title: "Error".into(),
            retry: "Retry".into(),
        },
    }
}
