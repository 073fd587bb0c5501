use std::f64::consts::TAU;

use yew::prelude::*;

use crate::model::{format_amount, Expense};

const PALETTE: [&str; 7] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#C9CBCF",
];

const CENTER: f64 = 100.0;
const RADIUS: f64 = 90.0;

/// One wedge of the pie. `start` and `end` are fractions of a full turn,
/// measured clockwise from twelve o'clock.
#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    pub category: String,
    pub amount: f64,
    pub color: &'static str,
    pub start: f64,
    pub end: f64,
}

/// Sum amounts per category, keeping the order categories first appear in.
/// Malformed amounts are skipped.
pub fn category_totals(expenses: &[Expense]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for expense in expenses {
        let Some(amount) = expense.amount.filter(|amount| amount.is_finite()) else {
            continue;
        };
        match totals.iter_mut().find(|(category, _)| *category == expense.category) {
            Some((_, total)) => *total += amount,
            None => totals.push((expense.category.clone(), amount)),
        }
    }
    totals
}

/// Lay out the categories with a positive total around the circle.
pub fn pie_slices(totals: &[(String, f64)]) -> Vec<Slice> {
    let positive = totals.iter().filter(|(_, amount)| *amount > 0.0);
    let sum: f64 = positive.clone().map(|(_, amount)| amount).sum();
    if sum <= 0.0 {
        return Vec::new();
    }

    let mut start = 0.0;
    positive
        .enumerate()
        .map(|(idx, (category, amount))| {
            let end = start + amount / sum;
            let slice = Slice {
                category: category.clone(),
                amount: *amount,
                color: PALETTE[idx % PALETTE.len()],
                start,
                end,
            };
            start = end;
            slice
        })
        .collect()
}

fn point(fraction: f64) -> (f64, f64) {
    let angle = fraction * TAU;
    (CENTER + RADIUS * angle.sin(), CENTER - RADIUS * angle.cos())
}

/// SVG path for a wedge that is strictly smaller than the whole circle.
fn wedge_path(slice: &Slice) -> String {
    let (x0, y0) = point(slice.start);
    let (x1, y1) = point(slice.end);
    let large_arc = if slice.end - slice.start > 0.5 { 1 } else { 0 };
    format!(
        "M {c} {c} L {:.2} {:.2} A {r} {r} 0 {} 1 {:.2} {:.2} Z",
        x0,
        y0,
        large_arc,
        x1,
        y1,
        c = CENTER,
        r = RADIUS
    )
}

#[derive(Properties, PartialEq)]
pub struct ExpenseOverviewProps {
    pub expenses: Vec<Expense>,
    pub currency_symbol: String,
}

#[function_component(ExpenseOverview)]
pub fn expense_overview(props: &ExpenseOverviewProps) -> Html {
    let slices = pie_slices(&category_totals(&props.expenses));

    let chart = match slices.as_slice() {
        [] => html! {
            <p class="text-sm text-muted-foreground text-center py-12">{"No expenses to chart yet."}</p>
        },
        // A single arc cannot describe a full circle.
        [only] => html! {
            <svg viewBox="0 0 200 200" class="w-48 h-48 mx-auto">
                <circle cx={CENTER.to_string()} cy={CENTER.to_string()} r={RADIUS.to_string()} fill={only.color}>
                    <title>{ only.category.clone() }</title>
                </circle>
            </svg>
        },
        many => html! {
            <svg viewBox="0 0 200 200" class="w-48 h-48 mx-auto">
                {
                    many.iter().map(|slice| html! {
                        <path d={wedge_path(slice)} fill={slice.color} stroke="#ffffff" stroke-width="1">
                            <title>{ slice.category.clone() }</title>
                        </path>
                    }).collect::<Html>()
                }
            </svg>
        },
    };

    html! {
        <div class="bg-white p-5 rounded-[10px] shadow-sm border border-white/50">
            <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">{"Expense Overview"}</h4>
            { chart }
            <ul class="mt-4 space-y-2">
                {
                    slices.iter().map(|slice| html! {
                        <li class="flex items-center justify-between text-sm">
                            <span class="flex items-center gap-2">
                                <span class="w-3 h-3 rounded-full inline-block" style={format!("background-color: {}", slice.color)}></span>
                                <span class="text-muted-foreground">{ slice.category.clone() }</span>
                            </span>
                            <span class="font-bold text-foreground">{ format_amount(slice.amount, &props.currency_symbol) }</span>
                        </li>
                    }).collect::<Html>()
                }
            </ul>
        </div>
    }
}
