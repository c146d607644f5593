use forja_core::{Attribute, AttributeValue, BackendConfig, Character, Part, PartKind};
use yew::prelude::*;

/// Presentation of one card: heading, palette and the glyph shown without an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStyle {
    pub title: &'static str,
    pub icon: &'static str,
    pub gradient_from: &'static str,
    pub gradient_to: &'static str,
    pub color: &'static str,
    pub fallback: &'static str,
}

impl CardStyle {
    #[must_use]
    pub const fn for_kind(kind: PartKind) -> Self {
        match kind {
            PartKind::Body => Self {
                title: "Forma Física",
                icon: "🧬",
                gradient_from: "from-blue-400",
                gradient_to: "to-purple-500",
                color: "text-blue-300",
                fallback: "🧬",
            },
            PartKind::Mount => Self {
                title: "Compañero",
                icon: "🐎",
                gradient_from: "from-green-400",
                gradient_to: "to-blue-500",
                color: "text-green-300",
                fallback: "🐎",
            },
            PartKind::Armor => Self {
                title: "Protección",
                icon: "🛡️",
                gradient_from: "from-yellow-400",
                gradient_to: "to-red-500",
                color: "text-yellow-300",
                fallback: "🛡️",
            },
            PartKind::Weapon => Self {
                title: "Arsenal",
                icon: "⚔️",
                gradient_from: "from-red-400",
                gradient_to: "to-purple-500",
                color: "text-red-300",
                fallback: "⚔️",
            },
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub part: Part,
    pub config: BackendConfig,
}

#[function_component(CharacterCard)]
pub fn character_card(props: &Props) -> Html {
    let style = CardStyle::for_kind(props.part.kind());
    let gradient = format!("{} {}", style.gradient_from, style.gradient_to);
    let image = props.config.image_url(props.part.image());

    html! {
        <div class={classes!("character-card", format!("character-card--{}", props.part.kind().key()),
            "bg-white/10", "backdrop-blur-lg", "border", "border-white/20", "rounded-3xl", "shadow-2xl", "p-6")}>
            <div class="flex flex-col items-center text-center">
                <div class={classes!("w-36", "h-36", "rounded-full", "bg-gradient-to-r", gradient.clone(),
                    "p-1", "mb-4", "flex", "items-center", "justify-center")}>
                    if let Some(src) = image {
                        <img {src} alt={style.title} class="w-full h-full rounded-full object-cover" />
                    } else {
                        <div class="text-4xl" aria-hidden="true">{ style.fallback }</div>
                    }
                </div>
                <h3 class="text-2xl font-bold mb-4 text-white flex items-center">
                    { style.icon }{ " " }
                    <span class={classes!("ml-2", "bg-gradient-to-r", gradient, "bg-clip-text", "text-transparent")}>
                        { style.title }
                    </span>
                </h3>
                <div class="space-y-3 text-left w-full">
                    { for props.part.attributes().iter().map(|attr| attribute_row(attr, style.color)) }
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct GridProps {
    pub character: Character,
    pub config: BackendConfig,
}

/// One card per present part, in body, mount, armor, weapon order.
#[function_component(CardGrid)]
pub fn card_grid(props: &GridProps) -> Html {
    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-6 animate-fade-in">
            { for props.character.parts().into_iter().map(|part| html! {
                <CharacterCard key={part.kind().key()} {part} config={props.config.clone()} />
            }) }
        </div>
    }
}

fn attribute_row(attr: &Attribute, color: &'static str) -> Html {
    match &attr.value {
        AttributeValue::List(items) => html! {
            <div class="mt-4" key={attr.key.clone()}>
                <span class={classes!("font-semibold", color)}>{ attr.label.clone() }</span>
                <ul class="list-none mt-2 space-y-1">
                    { for items.iter().map(|item| html! {
                        <li class="text-gray-300 pl-4 relative">
                            <span class="absolute left-0">{ "•" }</span>
                            { item.clone() }
                        </li>
                    }) }
                </ul>
            </div>
        },
        value => html! {
            <p class="text-gray-300" key={attr.key.clone()}>
                <span class={classes!("font-semibold", color)}>{ attr.label.clone() }</span>
                { " " }
                { value.as_display() }
            </p>
        },
    }
}
