use gloo::timers::callback::Timeout;
use yew::prelude::*;

/// Trailing-edge debounce of a callback. Each emit replaces the pending
/// timeout; the pending call is cancelled when the component unmounts.
#[hook]
pub fn use_debounce<T>(callback: Callback<T>, delay_ms: u32) -> Callback<T>
where
    T: 'static,
{
    let pending = use_mut_ref(|| None::<Timeout>);

    {
        let pending = pending.clone();
        use_effect_with((), move |_| {
            move || {
                // dropping the timeout cancels it
                pending.borrow_mut().take();
            }
        });
    }

    Callback::from(move |value: T| {
        let callback = callback.clone();
        let timeout = Timeout::new(delay_ms, move || callback.emit(value));
        *pending.borrow_mut() = Some(timeout);
    })
}
