pub fn render_index(products: &[String]) -> String {
    let options: String = products
        .iter()
        .map(|product| {
            let escaped = escape_html(product);
            format!(r#"<option value="{escaped}">{escaped}</option>"#)
        })
        .collect();
    INDEX_HTML.replace("{{PRODUCT_OPTIONS}}", &options)
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Sales &amp; Inventory Dashboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef6ee;
      --bg-2: #c8e6c9;
      --ink: #24302a;
      --accent: #4caf50;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f4fbf4 60%, #f7f9f4 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1200px, 100%);
      margin: 0 auto;
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-size: clamp(1.8rem, 4vw, 2.6rem);
      text-align: center;
      color: var(--accent);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    .row {
      display: grid;
      gap: 24px;
    }

    .row.top {
      grid-template-columns: 2fr 3fr;
    }

    .row.overview {
      grid-template-columns: 3fr 2fr;
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    form {
      display: grid;
      gap: 10px;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.85rem;
      color: #5f6b63;
    }

    input, select {
      font: inherit;
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(76, 175, 80, 0.3);
    }

    .metrics {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 16px;
    }

    .stat {
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.negative {
      color: #c63b2b;
    }

    svg {
      width: 100%;
      display: block;
    }

    svg text {
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 3;
    }

    .chart-point {
      fill: white;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .table-wrap {
      max-height: 320px;
      overflow: auto;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.9rem;
    }

    th, td {
      text-align: left;
      padding: 6px 8px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    .legend {
      display: grid;
      gap: 4px;
      font-size: 0.85rem;
    }

    .legend span {
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 3px;
      margin-right: 6px;
    }

    .pie-layout {
      display: grid;
      grid-template-columns: minmax(220px, 320px) 1fr;
      gap: 24px;
      align-items: center;
    }

    .info {
      color: #6b645d;
      margin: 0;
    }

    .status {
      font-size: 0.95rem;
      min-height: 1.2em;
      color: #6b645d;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    @media (max-width: 800px) {
      .row.top, .row.overview, .pie-layout {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>Simple Sales &amp; Inventory Dashboard</h1>

    <section class="row top">
      <div class="card">
        <h2>Add New Sales Entry</h2>
        <form id="entry-form" method="post" action="/entries">
          <label>Product Name <input name="product" id="product" type="text" /></label>
          <label>Stock <input name="stock" id="stock" type="number" min="0" step="1" value="0" required /></label>
          <label>Sold <input name="sold" id="sold" type="number" min="0" step="1" value="0" required /></label>
          <label>Date <input name="date" id="date" type="date" /></label>
          <button type="submit">Add Entry</button>
        </form>
        <div class="status" id="status"></div>
      </div>

      <div class="card">
        <h2>Inventory Metrics</h2>
        <div class="metrics" id="metrics">
          <div class="stat"><span class="label">Total Stocked</span><span class="value" id="total-stocked">--</span></div>
          <div class="stat"><span class="label">Total Sold</span><span class="value" id="total-sold">--</span></div>
          <div class="stat"><span class="label">Remaining Stock</span><span class="value" id="remaining">--</span></div>
        </div>
        <p class="info" id="metrics-empty" hidden>No data available.</p>
      </div>
    </section>

    <section class="card">
      <h2>Filter by Product</h2>
      <label>Choose a product
        <select id="filter">
          <option value="">All</option>
          {{PRODUCT_OPTIONS}}
        </select>
      </label>
    </section>

    <section class="row overview">
      <div class="card">
        <h2>Sales Over Time</h2>
        <svg id="line-chart" viewBox="0 0 600 260" role="img" aria-label="Daily sales"></svg>
      </div>
      <div class="card">
        <h2>Full Data Table</h2>
        <div class="table-wrap">
          <table>
            <thead><tr><th>Product</th><th>Stock</th><th>Sold</th><th>Date</th></tr></thead>
            <tbody id="rows"></tbody>
          </table>
        </div>
      </div>
    </section>

    <section class="card" id="pie-section">
      <h2>Product-wise Sales Distribution</h2>
      <label>Select one or more products to compare (leave empty to show top 10)
        <select id="pie-select" multiple size="5">
          {{PRODUCT_OPTIONS}}
        </select>
      </label>
      <h3 id="pie-title"></h3>
      <div class="pie-layout">
        <svg id="pie-chart" viewBox="0 0 240 240" role="img" aria-label="Sales share"></svg>
        <div class="legend" id="legend"></div>
      </div>
      <p class="info" id="pie-empty" hidden></p>
    </section>
  </main>

  <script>
    const palette = ['#4caf50', '#2f4858', '#ff6b4a', '#f2b134', '#6a4c93', '#1982c4', '#8ac926', '#ff595e', '#6d6875', '#00a6a6'];
    const statusEl = document.getElementById('status');
    const filterEl = document.getElementById('filter');
    const pieSelectEl = document.getElementById('pie-select');
    const lineEl = document.getElementById('line-chart');
    const pieEl = document.getElementById('pie-chart');

    const esc = (value) => String(value).replace(/[&<>"']/g, (ch) => ({
      '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;'
    }[ch]));

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const setOptions = (selectEl, products, keepAll) => {
      const chosen = new Set(Array.from(selectEl.selectedOptions).map((o) => o.value));
      const head = keepAll ? '<option value="">All</option>' : '';
      selectEl.innerHTML = head + products
        .map((p) => `<option value="${esc(p)}"${chosen.has(p) ? ' selected' : ''}>${esc(p)}</option>`)
        .join('');
    };

    const renderTotals = (totals) => {
      const empty = totals === null;
      document.getElementById('metrics').hidden = empty;
      document.getElementById('metrics-empty').hidden = !empty;
      if (empty) {
        return;
      }
      document.getElementById('total-stocked').textContent = totals.stocked;
      document.getElementById('total-sold').textContent = totals.sold;
      const remainingEl = document.getElementById('remaining');
      remainingEl.textContent = totals.remaining;
      remainingEl.classList.toggle('negative', totals.remaining < 0);
    };

    const renderLineChart = (points) => {
      if (!points.length) {
        lineEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data available to display graph.</text>';
        return;
      }

      const width = 600;
      const height = 260;
      const paddingX = 44;
      const paddingY = 40;
      const top = 20;

      const max = Math.max(1, ...points.map((p) => p.sold));
      const xStep = points.length > 1 ? (width - paddingX * 2) / (points.length - 1) : 0;
      const x = (index) => paddingX + index * xStep;
      const y = (value) => height - paddingY - (value / max) * (height - top - paddingY);

      let grid = '';
      for (let i = 0; i <= 4; i += 1) {
        const value = (max * i) / 4;
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${y(value)}" x2="${width - paddingX}" y2="${y(value)}" />`;
        grid += `<text class="chart-label" x="${paddingX - 8}" y="${y(value) + 4}" text-anchor="end">${Math.round(value)}</text>`;
      }

      const path = points
        .map((p, i) => `${i === 0 ? 'M' : 'L'} ${x(i).toFixed(2)} ${y(p.sold).toFixed(2)}`)
        .join(' ');
      const labelEvery = Math.max(1, Math.ceil(points.length / 10));
      const labels = points
        .map((p, i) => (i % labelEvery === 0
          ? `<text class="chart-label" x="${x(i)}" y="${height - paddingY + 18}" text-anchor="middle">${p.date}</text>`
          : ''))
        .join('');
      const circles = points
        .map((p, i) => `<circle class="chart-point" cx="${x(i)}" cy="${y(p.sold)}" r="4"><title>${p.date}: ${p.sold}</title></circle>`)
        .join('');

      lineEl.innerHTML = `${grid}<path class="chart-line" d="${path}" />${circles}${labels}`;
    };

    const renderRows = (rows) => {
      document.getElementById('rows').innerHTML = rows
        .map((r) => `<tr><td>${esc(r.Product)}</td><td>${r.Stock}</td><td>${r.Sold}</td><td>${r.Date}</td></tr>`)
        .join('');
    };

    const renderPie = (pie, hasData) => {
      const emptyEl = document.getElementById('pie-empty');
      const legendEl = document.getElementById('legend');
      document.getElementById('pie-title').textContent = pie.slices.length ? pie.title : '';
      const total = pie.slices.reduce((acc, s) => acc + s.sold, 0);

      if (!pie.slices.length || total === 0) {
        pieEl.innerHTML = '';
        legendEl.innerHTML = '';
        emptyEl.hidden = false;
        emptyEl.textContent = pie.mode === 'selection' && hasData
          ? 'No sales data available for selected product(s).'
          : 'No data available to show pie chart.';
        return;
      }
      emptyEl.hidden = true;

      const cx = 120;
      const cy = 120;
      const outer = 110;
      const inner = 110 * 0.4;
      let angle = -Math.PI / 2;
      const point = (r, a) => `${(cx + r * Math.cos(a)).toFixed(2)} ${(cy + r * Math.sin(a)).toFixed(2)}`;

      pieEl.innerHTML = pie.slices
        .filter((s) => s.sold > 0)
        .map((s, i) => {
          const sweep = (s.sold / total) * Math.PI * 2;
          const end = angle + Math.min(sweep, Math.PI * 2 - 0.0001);
          const large = sweep > Math.PI ? 1 : 0;
          const d = `M ${point(outer, angle)} A ${outer} ${outer} 0 ${large} 1 ${point(outer, end)} `
            + `L ${point(inner, end)} A ${inner} ${inner} 0 ${large} 0 ${point(inner, angle)} Z`;
          angle = end;
          return `<path d="${d}" fill="${palette[i % palette.length]}"><title>${esc(s.product)}: ${s.percent.toFixed(1)}%</title></path>`;
        })
        .join('');

      legendEl.innerHTML = pie.slices
        .filter((s) => s.sold > 0)
        .map((s, i) => `<div><span style="background:${palette[i % palette.length]}"></span>${esc(s.product)} (${s.percent.toFixed(1)}%)</div>`)
        .join('');
    };

    const loadDashboard = async () => {
      const params = new URLSearchParams();
      if (filterEl.value) {
        params.append('product', filterEl.value);
      }
      Array.from(pieSelectEl.selectedOptions).forEach((o) => params.append('select', o.value));

      const res = await fetch(`/api/dashboard?${params.toString()}`);
      if (!res.ok) {
        throw new Error('Unable to load dashboard');
      }
      const view = await res.json();

      setOptions(filterEl, view.products, true);
      filterEl.value = view.filter || '';
      setOptions(pieSelectEl, view.products, false);
      renderTotals(view.totals);
      renderLineChart(view.daily_sales);
      renderRows(view.table_rows);
      renderPie(view.pie, view.totals !== null);
    };

    document.getElementById('entry-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const form = event.target;
      const body = {
        product: form.product.value,
        stock: Number(form.stock.value),
        sold: Number(form.sold.value)
      };
      if (form.date.value) {
        body.date = form.date.value;
      }

      try {
        setStatus('Saving...', 'info');
        const res = await fetch('/api/entries', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify(body)
        });
        if (!res.ok) {
          const msg = await res.text();
          throw new Error(msg || 'Request failed');
        }
        const saved = await res.json();
        form.reset();
        setStatus(saved.message, 'ok');
        await loadDashboard();
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    filterEl.addEventListener('change', () => loadDashboard().catch((err) => setStatus(err.message, 'error')));
    pieSelectEl.addEventListener('change', () => loadDashboard().catch((err) => setStatus(err.message, 'error')));

    loadDashboard().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_options_are_escaped() {
        let html = render_index(&["Tea & <Biscuits>".to_string()]);
        assert!(html.contains(r#"<option value="Tea &amp; &lt;Biscuits&gt;">"#));
        assert!(!html.contains("{{PRODUCT_OPTIONS}}"));
    }
}
