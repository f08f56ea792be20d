use api_client::api::cases::list_cases;
use api_client::api::evidence::create_evidence;
use api_client::api::users::list_experts;
use dioxus::prelude::*;
use shared_types::{
    Attachment, BodyCondition, EvidenceIntakeForm, EvidenceKind, PageQuery, Sex,
    VictimIdentification, WizardForm, WizardState, BODY_CONDITIONS, EVIDENCE_KINDS, SEXES,
    VICTIM_IDENTIFICATIONS,
};
use shared_ui::{
    Card, CardContent, Form, FormError, FormSelect, Input, PageHeader, Stepper,
    Textarea,
};

use crate::auth::use_auth;
use crate::components::{FilePicker, WizardNav, WizardSuccess};
use crate::routes::Route;
use crate::tasks::use_latest_task;

/// Cases offered in the case picker.
const CASE_PICKER_LIMIT: u32 = 100;

/// Evidence intake: case and collector, victim data, then the content
/// (a note for text evidence, a file for image evidence).
#[component]
pub fn EvidenceCreatePage() -> Element {
    let auth = use_auth();
    let mut form = use_signal(|| EvidenceIntakeForm {
        coletado_por: auth.user().map(|u| u.id).unwrap_or_default(),
        ..Default::default()
    });
    let mut image = use_signal(|| Option::<Attachment>::None);
    let mut wizard = use_signal(WizardState::for_form::<EvidenceIntakeForm>);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);
    let mut created = use_signal(|| false);
    let mut submission = use_latest_task();

    let cases = use_resource(move || async move {
        let client = auth.client();
        auth.checked(list_cases(&client, &PageQuery::new(1, CASE_PICKER_LIMIT)).await)
            .map(|page| page.data)
    });
    let experts = use_resource(move || async move {
        let client = auth.client();
        auth.checked(list_experts(&client).await)
    });

    use_effect(move || {
        let picked = image.read().clone();
        form.write().imagem = picked;
    });

    let handle_submit = move |_: FormEvent| {
        let current = form.read().clone();
        if !wizard.write().submit_or_advance(&current) {
            return;
        }
        let request = match current.to_request() {
            Ok(request) => request,
            Err(e) => {
                error_msg.set(Some(e.user_message()));
                return;
            }
        };
        let attachment = current.attachment().cloned();
        submitting.set(true);
        error_msg.set(None);
        submission.run(async move {
            let client = auth.client();
            match auth.checked(create_evidence(&client, &request, attachment).await) {
                Ok(evidence) => {
                    tracing::info!(evidence_id = %evidence.id, "Evidence registered");
                    let collector = form.read().coletado_por.clone();
                    form.set(EvidenceIntakeForm {
                        coletado_por: collector,
                        ..Default::default()
                    });
                    image.set(None);
                    wizard.write().reset();
                    created.set(true);
                }
                Err(e) => error_msg.set(Some(e.user_message())),
            }
            submitting.set(false);
        });
    };

    let state = *wizard.read();
    let current = form.read().clone();
    let steps: Vec<String> = EvidenceIntakeForm::STEPS.iter().map(|s| s.to_string()).collect();

    rsx! {
        div { class: "container wizard",
            PageHeader { title: "Nova evidência" }

            if created() {
                WizardSuccess {
                    title: "Evidência cadastrada",
                    message: "A evidência foi registrada com sucesso.",
                    again_label: "Cadastrar outra evidência",
                    on_again: move |_| created.set(false),
                    p {
                        Link { to: Route::EvidenceList {}, "Ver lista de evidências" }
                    }
                }
            } else {
                Card {
                    CardContent {
                        Stepper { steps, current: state.step() }
                        Form { onsubmit: handle_submit,
                            div { class: "wizard-fields",
                                match state.step() {
                                    0 => rsx! {
                                        match &*cases.read() {
                                            Some(Ok(list)) => rsx! {
                                                FormSelect {
                                                    label: "Caso",
                                                    placeholder: "Selecione o caso",
                                                    value: current.caso.clone(),
                                                    onchange: move |evt: FormEvent| form.write().caso = evt.value(),
                                                    for case in list.iter() {
                                                        option { key: "{case.id}", value: case.id.clone(), "{case.title}" }
                                                    }
                                                }
                                            },
                                            Some(Err(e)) => rsx! { FormError { message: e.user_message() } },
                                            None => rsx! { p { class: "muted", "Carregando casos..." } },
                                        }
                                        Input {
                                            label: "Categoria",
                                            required: true,
                                            placeholder: "Ex.: arcada dentária",
                                            value: current.categoria.clone(),
                                            on_input: move |evt: FormEvent| form.write().categoria = evt.value(),
                                        }
                                        match &*experts.read() {
                                            Some(Ok(list)) => rsx! {
                                                FormSelect {
                                                    label: "Coletado por",
                                                    placeholder: "Selecione o responsável",
                                                    value: current.coletado_por.clone(),
                                                    onchange: move |evt: FormEvent| form.write().coletado_por = evt.value(),
                                                    for expert in list.iter() {
                                                        option { key: "{expert.id}", value: expert.id.clone(), "{expert.nome}" }
                                                    }
                                                }
                                            },
                                            Some(Err(e)) => rsx! { FormError { message: e.user_message() } },
                                            None => rsx! { p { class: "muted", "Carregando peritos..." } },
                                        }
                                    },
                                    1 => rsx! {
                                        FormSelect {
                                            label: "Vítima",
                                            placeholder: "Selecione",
                                            value: current.vitima.map(|v| v.as_str()).unwrap_or_default(),
                                            onchange: move |evt: FormEvent| form.write().vitima = VictimIdentification::parse(&evt.value()),
                                            for v in VICTIM_IDENTIFICATIONS.iter() {
                                                option { key: "{v.as_str()}", value: v.as_str(), "{v.label()}" }
                                            }
                                        }
                                        FormSelect {
                                            label: "Sexo",
                                            placeholder: "Selecione",
                                            value: current.sexo.map(|s| s.as_str()).unwrap_or_default(),
                                            onchange: move |evt: FormEvent| form.write().sexo = Sex::parse(&evt.value()),
                                            for s in SEXES.iter() {
                                                option { key: "{s.as_str()}", value: s.as_str(), "{s.label()}" }
                                            }
                                        }
                                        FormSelect {
                                            label: "Estado do corpo",
                                            placeholder: "Selecione",
                                            value: current.estado_corpo.map(|c| c.as_str()).unwrap_or_default(),
                                            onchange: move |evt: FormEvent| form.write().estado_corpo = BodyCondition::parse(&evt.value()),
                                            for c in BODY_CONDITIONS.iter() {
                                                option { key: "{c.as_str()}", value: c.as_str(), "{c.label()}" }
                                            }
                                        }
                                        Textarea {
                                            label: "Lesões",
                                            placeholder: "Opcional",
                                            value: current.lesoes.clone(),
                                            on_input: move |evt: FormEvent| form.write().lesoes = evt.value(),
                                        }
                                    },
                                    _ => rsx! {
                                        FormSelect {
                                            label: "Tipo",
                                            value: current.tipo.as_str(),
                                            onchange: move |evt: FormEvent| {
                                                if let Some(kind) = EvidenceKind::parse(&evt.value()) {
                                                    form.write().tipo = kind;
                                                }
                                            },
                                            for kind in EVIDENCE_KINDS.iter() {
                                                option { key: "{kind.as_str()}", value: kind.as_str(), "{kind.label()}" }
                                            }
                                        }
                                        if current.tipo == EvidenceKind::Text {
                                            Textarea {
                                                label: "Conteúdo",
                                                required: true,
                                                rows: 6,
                                                value: current.conteudo.clone(),
                                                on_input: move |evt: FormEvent| form.write().conteudo = evt.value(),
                                            }
                                        } else {
                                            FilePicker {
                                                label: "Imagem",
                                                accept: "image/*",
                                                file: image,
                                            }
                                        }
                                        Textarea {
                                            label: "Laudo",
                                            placeholder: "Observações periciais (opcional)",
                                            value: current.laudo.clone(),
                                            on_input: move |evt: FormEvent| form.write().laudo = evt.value(),
                                        }
                                    },
                                }
                            }
                            if let Some(err) = error_msg() {
                                p { class: "error-line", role: "alert", "{err}" }
                            }
                            WizardNav {
                                is_first: state.is_first(),
                                is_last: state.is_last(),
                                step_complete: current.step_complete(state.step()),
                                busy: submitting(),
                                submit_label: "Cadastrar evidência",
                                on_back: move |_| {
                                    wizard.write().back();
                                },
                                on_next: move |_| {
                                    let snapshot = form.read().clone();
                                    wizard.write().next(&snapshot);
                                },
                            }
                        }
                    }
                }
            }
        }
    }
}
