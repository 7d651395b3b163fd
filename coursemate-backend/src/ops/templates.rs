use crate::error::{StoreError, StoreResult};
use crate::models::{Template, TemplateDefinition, TemplateSection};
use crate::store::DataStore;

impl DataStore {
    pub fn create_template(&mut self, definition: TemplateDefinition) -> StoreResult<Template> {
        let (name, sections) = self.validate_definition(&definition, None)?;
        let template = Template {
            id: self.new_template_id(),
            name,
            sections,
            kind: definition.kind,
            builtin: false,
        };
        self.templates_mut(definition.kind).push(template.clone());
        log::info!("[STORE] Created {} template {:?}", definition.kind.as_ref(), template.name);
        self.persist();
        Ok(template)
    }

    /// Replace a user template's name, sections and kind. It keeps its place
    /// in the picker unless the kind changes, which moves it to the end of the
    /// other collection.
    pub fn update_template(&mut self, id: &str, definition: TemplateDefinition) -> StoreResult<Template> {
        match self.template(id) {
            None => return Err(StoreError::not_found("template", id)),
            Some(t) if t.builtin => {
                return Err(StoreError::validation(format!("built-in template {:?} cannot be edited", t.name)));
            }
            Some(_) => {}
        }
        let (name, sections) = self.validate_definition(&definition, Some(id))?;

        let current_kind = self
            .template(id)
            .map(|t| t.kind)
            .ok_or_else(|| StoreError::not_found("template", id))?;

        let updated = if current_kind == definition.kind {
            let template = self
                .templates_mut(current_kind)
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| StoreError::not_found("template", id))?;
            template.name = name;
            template.sections = sections;
            template.clone()
        } else {
            let mut template = self
                .remove_template(id)
                .ok_or_else(|| StoreError::not_found("template", id))?;
            template.name = name;
            template.sections = sections;
            template.kind = definition.kind;
            self.templates_mut(definition.kind).push(template.clone());
            template
        };
        self.persist();
        Ok(updated)
    }

    /// Delete a user template. Notes created from it keep their dangling `templateId`.
    pub fn delete_template(&mut self, id: &str) -> StoreResult<Template> {
        match self.template(id) {
            None => return Err(StoreError::not_found("template", id)),
            Some(t) if t.builtin => {
                return Err(StoreError::validation(format!("built-in template {:?} cannot be deleted", t.name)));
            }
            Some(_) => {}
        }
        let removed = self
            .remove_template(id)
            .ok_or_else(|| StoreError::not_found("template", id))?;
        self.persist();
        Ok(removed)
    }

    fn validate_definition(
        &self,
        definition: &TemplateDefinition,
        except_id: Option<&str>,
    ) -> StoreResult<(String, Vec<TemplateSection>)> {
        let name = definition.name.trim();
        if name.is_empty() {
            return Err(StoreError::validation("template name cannot be empty"));
        }
        if definition.sections.is_empty() {
            return Err(StoreError::validation("template needs at least one section"));
        }
        let mut sections = Vec::with_capacity(definition.sections.len());
        for (i, section) in definition.sections.iter().enumerate() {
            let label = section.label.trim();
            if label.is_empty() {
                return Err(StoreError::validation(format!("section {} has no label", i + 1)));
            }
            sections.push(TemplateSection::new(label, section.placeholder.clone()));
        }

        let lowered = name.to_lowercase();
        let clash = self
            .templates(definition.kind)
            .iter()
            .any(|t| t.name.trim().to_lowercase() == lowered && Some(t.id.as_str()) != except_id);
        if clash {
            return Err(StoreError::validation(format!("a template named {:?} already exists", name)));
        }

        Ok((name.to_string(), sections))
    }
}
